//! Shared identifiers and the order model used across the kitchen.

use crate::menu::MenuItem;

/// Number assigned to an order when the queue accepts it (1-based).
pub type OrderNumber = u64;
/// Unique identifier for a customer thread.
pub type CustomerId = u64;
/// Unique identifier for a cook thread.
pub type CookId = u64;

/// An accepted order: the queue-assigned number plus the producer's payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order<P> {
    /// Position of this order in the queue's acceptance history.
    pub number: OrderNumber,
    /// Application data; the queue never inspects it.
    pub payload: P,
}

/// What a customer asks the kitchen for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dish {
    pub menu_item: MenuItem,
    pub customer_id: CustomerId,
}

impl Dish {
    pub fn new(menu_item: MenuItem, customer_id: CustomerId) -> Self {
        Self {
            menu_item,
            customer_id,
        }
    }
}
