//! Kitchen run parameters and their defaults.

use crate::error::ConfigError;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_CUSTOMERS: usize = 90;
pub const DEFAULT_COOKS: usize = 10;
pub const DEFAULT_ORDERS_PER_CUSTOMER: usize = 3;

/// One kitchen run: queue size, worker counts, and pacing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KitchenConfig {
    pub capacity: usize,
    pub customers: usize,
    pub cooks: usize,
    pub orders_per_customer: usize,
    /// Simulated cooking time per order.
    pub work_ms: u64,
    /// Seed for menu selection; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            customers: DEFAULT_CUSTOMERS,
            cooks: DEFAULT_COOKS,
            orders_per_customer: DEFAULT_ORDERS_PER_CUSTOMER,
            work_ms: 0,
            seed: None,
        }
    }
}

impl KitchenConfig {
    /// Total orders the queue must see before cooks stop.
    pub fn expected_orders(&self) -> u64 {
        (self.customers as u64) * (self.orders_per_customer as u64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Zero("capacity"));
        }
        if self.customers == 0 {
            return Err(ConfigError::Zero("customers"));
        }
        if self.cooks == 0 {
            return Err(ConfigError::Zero("cooks"));
        }
        if self.orders_per_customer == 0 {
            return Err(ConfigError::Zero("orders_per_customer"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_restaurant_setup() {
        let config = KitchenConfig::default();
        assert_eq!(config.expected_orders(), 270);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_workers_are_rejected() {
        let config = KitchenConfig {
            cooks: 0,
            ..KitchenConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Zero("cooks")));

        let config = KitchenConfig {
            capacity: 0,
            ..KitchenConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Zero("capacity")));
    }
}
