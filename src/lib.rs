//! Bounded order queue coordinating customer and cook threads.
//!
//! [`order_queue::OrderQueue`] is the shared monitor: customers block on a
//! full queue, cooks block on an empty one until every expected order has
//! been handed out. [`kitchen::run_kitchen`] runs one full shift around it
//! and [`sim`] wraps that in demo, benchmark, and stress runners.

pub mod config;
pub mod error;
pub mod kitchen;
pub mod logging;
pub mod menu;
pub mod order_queue;
pub mod sim;
pub mod types;
