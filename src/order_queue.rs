//! Bounded FIFO order queue shared by customer and cook threads.
//!
//! Customers block in [`OrderQueue::submit`] while the queue is full and cooks
//! block in [`OrderQueue::take`] while it is empty. Cooks are released with
//! [`Take::EndOfWork`] once every order the queue was opened for has been
//! handed out, so an empty queue alone never ends the shift.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{QueueError, Rejected};
use crate::types::{Order, OrderNumber};

/// Result of a take: the next order, or word that none will ever come.
#[derive(Debug, PartialEq, Eq)]
pub enum Take<P> {
    Order(Order<P>),
    EndOfWork,
}

impl<P> Take<P> {
    pub fn into_order(self) -> Option<Order<P>> {
        match self {
            Take::Order(order) => Some(order),
            Take::EndOfWork => None,
        }
    }

    pub fn is_end_of_work(&self) -> bool {
        matches!(self, Take::EndOfWork)
    }
}

/// Point-in-time view of the queue counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueStats {
    pub submitted: u64,
    pub handled: u64,
    pub expected: u64,
    pub pending: usize,
    /// Largest number of orders ever buffered at once.
    pub peak_pending: usize,
    pub capacity: usize,
}

/// Final accounting produced by [`OrderQueue::close`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseReport {
    pub expected: u64,
    pub submitted: u64,
    pub handled: u64,
    /// Orders still buffered at close; they are dropped.
    pub leftover: usize,
}

impl CloseReport {
    pub fn is_balanced(&self) -> bool {
        self.handled == self.expected && self.leftover == 0
    }
}

/// Capacity-limited order queue with accounting-based termination.
pub struct OrderQueue<P> {
    inner: Mutex<QueueState<P>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
    expected: u64,
}

struct QueueState<P> {
    pending: VecDeque<Order<P>>,
    next_number: OrderNumber,
    handled: u64,
    peak_pending: usize,
    closed: bool,
}

impl<P> QueueState<P> {
    fn submitted(&self) -> u64 {
        self.next_number - 1
    }
}

fn ensure_open<P>(state: &QueueState<P>) {
    assert!(!state.closed, "order queue used after close");
}

impl<P> OrderQueue<P> {
    /// Open a queue holding at most `capacity` orders that will receive
    /// exactly `expected` submissions over its lifetime.
    pub fn open(capacity: usize, expected: u64) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        debug!(capacity, expected, "order queue opened");
        Ok(Self {
            inner: Mutex::new(QueueState {
                pending: VecDeque::new(),
                next_number: 1,
                handled: 0,
                peak_pending: 0,
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
            expected,
        })
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<P>> {
        self.inner.lock().expect("order queue mutex poisoned")
    }

    fn lock_open(&self) -> MutexGuard<'_, QueueState<P>> {
        let guard = self.lock();
        ensure_open(&guard);
        guard
    }

    /// Submit an order, blocking while the queue is full.
    ///
    /// Returns the order number assigned on acceptance. A rejected payload
    /// is handed back and no number is consumed.
    pub fn submit(&self, payload: P) -> Result<OrderNumber, Rejected<P>> {
        let mut guard = self.lock_open();
        loop {
            if guard.submitted() >= self.expected {
                return Err(self.oversubscribed(payload));
            }
            if guard.pending.len() < self.capacity {
                return self.accept(&mut guard, payload);
            }
            // Wait releases the lock and re-acquires it before returning.
            guard = self.not_full.wait(guard).expect("condvar wait failed");
            ensure_open(&guard);
        }
    }

    /// Like [`submit`](Self::submit), but gives up once `timeout` elapses.
    pub fn submit_timeout(&self, payload: P, timeout: Duration) -> Result<OrderNumber, Rejected<P>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.submit(payload);
        };
        let mut guard = self.lock_open();
        loop {
            if guard.submitted() >= self.expected {
                return Err(self.oversubscribed(payload));
            }
            if guard.pending.len() < self.capacity {
                return self.accept(&mut guard, payload);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(Rejected::new(payload, QueueError::TimedOut(timeout)));
            }
            let (next, _) = self
                .not_full
                .wait_timeout(guard, deadline - now)
                .expect("condvar wait failed");
            guard = next;
            ensure_open(&guard);
        }
    }

    fn oversubscribed(&self, payload: P) -> Rejected<P> {
        Rejected::new(
            payload,
            QueueError::Oversubscribed {
                expected: self.expected,
            },
        )
    }

    fn accept(&self, state: &mut QueueState<P>, payload: P) -> Result<OrderNumber, Rejected<P>> {
        if let Err(err) = state.pending.try_reserve(1) {
            return Err(Rejected::new(payload, err.into()));
        }
        let number = state.next_number;
        state.next_number += 1;
        state.pending.push_back(Order { number, payload });
        state.peak_pending = state.peak_pending.max(state.pending.len());
        self.not_empty.notify_one();
        Ok(number)
    }

    /// Take the oldest order, blocking while the queue is empty and more
    /// orders are still expected.
    pub fn take(&self) -> Take<P> {
        let mut guard = self.lock_open();
        loop {
            if let Some(take) = self.take_ready(&mut guard) {
                return take;
            }
            guard = self.not_empty.wait(guard).expect("condvar wait failed");
            ensure_open(&guard);
        }
    }

    /// Like [`take`](Self::take), but fails with [`QueueError::TimedOut`]
    /// once `timeout` elapses with nothing to hand out.
    pub fn take_timeout(&self, timeout: Duration) -> Result<Take<P>, QueueError> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Ok(self.take());
        };
        let mut guard = self.lock_open();
        loop {
            if let Some(take) = self.take_ready(&mut guard) {
                return Ok(take);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(QueueError::TimedOut(timeout));
            }
            let (next, _) = self
                .not_empty
                .wait_timeout(guard, deadline - now)
                .expect("condvar wait failed");
            guard = next;
            ensure_open(&guard);
        }
    }

    /// Take without blocking; `None` means a blocking take would wait.
    pub fn try_take(&self) -> Option<Take<P>> {
        let mut guard = self.lock_open();
        self.take_ready(&mut guard)
    }

    fn take_ready(&self, state: &mut QueueState<P>) -> Option<Take<P>> {
        if let Some(order) = state.pending.pop_front() {
            state.handled += 1;
            self.not_full.notify_one();
            if state.handled >= self.expected {
                // Last expected order is out; idle cooks can stop now.
                self.not_empty.notify_all();
            }
            return Some(Take::Order(order));
        }
        if state.handled >= self.expected {
            self.not_empty.notify_all();
            return Some(Take::EndOfWork);
        }
        None
    }

    /// Close the queue and report final accounting.
    ///
    /// Every worker must have been joined first. Mismatched accounting is
    /// logged as a warning, not treated as fatal.
    pub fn close(&self) -> CloseReport {
        let mut guard = self.lock();
        assert!(!guard.closed, "order queue closed twice");
        guard.closed = true;
        let leftover = guard.pending.len();
        guard.pending.clear();
        let report = CloseReport {
            expected: self.expected,
            submitted: guard.submitted(),
            handled: guard.handled,
            leftover,
        };
        // Anyone still waiting broke the join-before-close contract.
        self.not_full.notify_all();
        self.not_empty.notify_all();
        drop(guard);

        if report.is_balanced() {
            info!(handled = report.handled, "order queue closed");
        } else {
            warn!(
                expected = report.expected,
                handled = report.handled,
                leftover = report.leftover,
                "order accounting mismatch at close"
            );
        }
        report
    }

    /// Current number of buffered orders.
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    pub fn stats(&self) -> QueueStats {
        let guard = self.lock();
        QueueStats {
            submitted: guard.submitted(),
            handled: guard.handled,
            expected: self.expected,
            pending: guard.pending.len(),
            peak_pending: guard.peak_pending,
            capacity: self.capacity,
        }
    }
}
