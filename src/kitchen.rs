//! Customer and cook workers plus the orchestrator for one kitchen shift.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::KitchenConfig;
use crate::error::RunError;
use crate::menu;
use crate::order_queue::{OrderQueue, Take};
use crate::types::{CookId, CustomerId, Dish, OrderNumber};

/// Extra checks gathered when a run is validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validation {
    /// Some order number was delivered to cooks more than once.
    pub duplicates: bool,
    /// Delivered numbers are exactly `1..=expected`.
    pub complete: bool,
}

/// Outcome of one kitchen shift.
#[derive(Clone, Debug)]
pub struct KitchenReport {
    pub capacity: usize,
    pub expected: u64,
    pub handled: u64,
    pub leftover: usize,
    pub peak_pending: usize,
    /// Orders fulfilled by each cook, indexed by cook id.
    pub per_cook: Vec<usize>,
    pub elapsed: Duration,
    pub validation: Option<Validation>,
}

impl KitchenReport {
    pub fn accounting_ok(&self) -> bool {
        self.handled == self.expected && self.leftover == 0
    }

    pub fn fulfilled(&self) -> usize {
        self.per_cook.iter().sum()
    }
}

fn spawn_named<T, F>(role: &'static str, id: usize, work: F) -> Result<JoinHandle<T>, RunError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new()
        .name(format!("{role}-{id}"))
        .spawn(work)
        .map_err(|source| RunError::Spawn { role, source })
}

fn join_named<T>(handle: JoinHandle<T>) -> Result<T, RunError> {
    let name = handle.thread().name().unwrap_or("worker").to_string();
    handle.join().map_err(|_| RunError::WorkerPanicked(name))
}

fn customer_rng(seed: Option<u64>, id: CustomerId) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id)),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Place `orders` orders, each for a random menu item.
fn customer<R: Rng>(
    queue: &OrderQueue<Dish>,
    id: CustomerId,
    orders: usize,
    rng: &mut R,
) -> Result<(), RunError> {
    for _ in 0..orders {
        let dish = Dish::new(menu::pick(rng), id);
        let item = dish.menu_item;
        let number = queue.submit(dish).map_err(|rejected| RunError::Rejected {
            customer: id,
            reason: rejected.reason,
        })?;
        debug!(customer = id, order = number, item, "order placed");
    }
    Ok(())
}

/// Cook until the queue reports end of work; returns orders fulfilled.
fn cook(
    queue: &OrderQueue<Dish>,
    id: CookId,
    work: Duration,
    seen: Option<&Mutex<Vec<OrderNumber>>>,
) -> usize {
    let mut fulfilled = 0usize;
    while let Take::Order(order) = queue.take() {
        if let Some(seen) = seen {
            seen.lock().expect("seen mutex poisoned").push(order.number);
        }
        debug!(
            cook = id,
            order = order.number,
            item = order.payload.menu_item,
            customer = order.payload.customer_id,
            "cooking"
        );
        if !work.is_zero() {
            thread::sleep(work);
        }
        fulfilled += 1;
    }
    debug!(cook = id, fulfilled, "no more orders");
    fulfilled
}

fn check_numbers(mut numbers: Vec<OrderNumber>, expected: u64) -> Validation {
    numbers.sort_unstable();
    let duplicates = numbers.windows(2).any(|pair| pair[0] == pair[1]);
    let complete = numbers.len() as u64 == expected
        && numbers.iter().copied().eq(1..=expected);
    Validation {
        duplicates,
        complete,
    }
}

/// Open the queue, run every customer and cook to completion, then close.
///
/// Customers are joined before cooks, and the queue is closed only after
/// both groups finish. If a customer fails, the error is returned without
/// waiting on cooks, which could otherwise block on orders that never come.
pub fn run_kitchen(config: &KitchenConfig, validate: bool) -> Result<KitchenReport, RunError> {
    config.validate()?;
    let expected = config.expected_orders();
    let queue = Arc::new(OrderQueue::open(config.capacity, expected)?);
    let seen = validate.then(|| Arc::new(Mutex::new(Vec::with_capacity(expected as usize))));
    let work = Duration::from_millis(config.work_ms);

    info!(
        capacity = queue.capacity(),
        customers = config.customers,
        cooks = config.cooks,
        expected = queue.expected(),
        "kitchen open"
    );
    let start = Instant::now();

    let mut customers = Vec::with_capacity(config.customers);
    for customer_id in 0..config.customers {
        let queue = Arc::clone(&queue);
        let orders = config.orders_per_customer;
        let seed = config.seed;
        customers.push(spawn_named("customer", customer_id, move || {
            let id = customer_id as CustomerId;
            let mut rng = customer_rng(seed, id);
            customer(&queue, id, orders, &mut rng)
        })?);
    }

    let mut cooks = Vec::with_capacity(config.cooks);
    for cook_id in 0..config.cooks {
        let queue = Arc::clone(&queue);
        let seen = seen.as_ref().map(Arc::clone);
        cooks.push(spawn_named("cook", cook_id, move || {
            cook(&queue, cook_id as CookId, work, seen.as_deref())
        })?);
    }

    for handle in customers {
        join_named(handle)??;
    }
    let mut per_cook = Vec::with_capacity(config.cooks);
    for handle in cooks {
        per_cook.push(join_named(handle)?);
    }
    let elapsed = start.elapsed();

    let close = queue.close();
    let stats = queue.stats();
    let validation = seen.map(|seen| {
        let numbers = std::mem::take(&mut *seen.lock().expect("seen mutex poisoned"));
        check_numbers(numbers, expected)
    });

    info!(
        handled = close.handled,
        elapsed_ms = elapsed.as_millis() as u64,
        "kitchen closed"
    );
    Ok(KitchenReport {
        capacity: stats.capacity,
        expected,
        handled: close.handled,
        leftover: close.leftover,
        peak_pending: stats.peak_pending,
        per_cook,
        elapsed,
        validation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn small_config() -> KitchenConfig {
        KitchenConfig {
            capacity: 4,
            customers: 6,
            cooks: 3,
            orders_per_customer: 5,
            work_ms: 0,
            seed: Some(11),
        }
    }

    #[test]
    fn shift_handles_every_order_once() {
        let report = run_kitchen(&small_config(), true).expect("kitchen run");
        assert_eq!(report.expected, 30);
        assert_eq!(report.fulfilled(), 30);
        assert!(report.accounting_ok());
        assert!(report.peak_pending <= 4);
        assert_eq!(report.per_cook.len(), 3);
        assert_eq!(
            report.validation,
            Some(Validation {
                duplicates: false,
                complete: true,
            })
        );
    }

    #[test]
    fn single_slot_queue_still_drains() {
        let config = KitchenConfig {
            capacity: 1,
            customers: 8,
            cooks: 2,
            orders_per_customer: 4,
            work_ms: 0,
            seed: None,
        };
        let report = run_kitchen(&config, false).expect("kitchen run");
        assert!(report.accounting_ok());
        assert_eq!(report.peak_pending, 1);
        assert!(report.validation.is_none());
    }

    #[test]
    fn more_cooks_than_orders_all_go_home() {
        let config = KitchenConfig {
            capacity: 2,
            customers: 1,
            cooks: 6,
            orders_per_customer: 2,
            work_ms: 1,
            seed: Some(3),
        };
        let report = run_kitchen(&config, true).expect("kitchen run");
        assert_eq!(report.fulfilled(), 2);
        assert_eq!(report.per_cook.len(), 6);
    }

    #[test]
    fn invalid_config_is_rejected_before_spawning() {
        let config = KitchenConfig {
            customers: 0,
            ..small_config()
        };
        let err = run_kitchen(&config, false).expect_err("zero customers accepted");
        assert!(matches!(err, RunError::Config(ConfigError::Zero("customers"))));
    }

    #[test]
    fn number_check_flags_duplicates_and_gaps() {
        assert_eq!(
            check_numbers(vec![3, 1, 2], 3),
            Validation {
                duplicates: false,
                complete: true,
            }
        );
        assert_eq!(
            check_numbers(vec![1, 2, 2], 3),
            Validation {
                duplicates: true,
                complete: false,
            }
        );
        assert!(!check_numbers(vec![1, 3], 3).complete);
    }
}
