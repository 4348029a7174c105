//! Error types for the order queue and the kitchen runner.

use std::collections::TryReserveError;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the order queue itself.
#[derive(Debug, Error)]
pub enum QueueError {
    /// A queue with no slots could never accept an order.
    #[error("queue capacity must be > 0")]
    ZeroCapacity,

    /// Every declared order has already been accepted.
    #[error("all {expected} expected orders were already submitted")]
    Oversubscribed { expected: u64 },

    /// Storage for one more order could not be reserved.
    #[error("failed to reserve queue storage: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// A submission the queue did not accept; the payload is handed back.
#[derive(Debug)]
pub struct Rejected<P> {
    pub payload: P,
    pub reason: QueueError,
}

impl<P> fmt::Display for Rejected<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order rejected: {}", self.reason)
    }
}

impl<P: fmt::Debug> std::error::Error for Rejected<P> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

impl<P> Rejected<P> {
    pub fn new(payload: P, reason: QueueError) -> Self {
        Self { payload, reason }
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

/// Invalid kitchen configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be > 0")]
    Zero(&'static str),

    #[error("{0} set must not be empty")]
    EmptySet(&'static str),
}

/// Failures while running a kitchen simulation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        role: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} thread panicked")]
    WorkerPanicked(String),

    /// A customer's order was refused by the queue.
    #[error("order from customer {customer} rejected: {reason}")]
    Rejected {
        customer: u64,
        #[source]
        reason: QueueError,
    },
}
