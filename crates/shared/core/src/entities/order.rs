use serde::{Deserialize, Serialize};
use std::fmt;

use super::Side;
use crate::values::{OrderId, Price, Quantity, Tick};

/// Resting limit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Remaining quantity, decremented by fills
    pub quantity: Quantity,
    pub tick_placed: Tick,
    /// Set exactly once, when quantity reaches zero
    pub tick_taken: Option<Tick>,
}

impl Order {
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity, tick_placed: Tick) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            tick_placed,
            tick_taken: None,
        }
    }

    /// An order is active while it is unfilled and has not been taken
    pub fn is_active(&self) -> bool {
        self.tick_taken.is_none() && self.quantity > 0
    }

    /// Returns true if the order has no remaining quantity
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Reduce the remaining quantity by a fill.
    ///
    /// Overfilling or filling a taken order is a book corruption and panics.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            self.tick_taken.is_none(),
            "order {} filled after being taken",
            self.id
        );
        assert!(
            quantity <= self.quantity,
            "order {} overfilled: {} > {}",
            self.id,
            quantity,
            self.quantity
        );
        self.quantity -= quantity;
    }

    /// Stamp the order as taken and move it into its completed form
    pub fn complete(self, tick_taken: Tick) -> CompletedOrder {
        assert!(
            self.is_filled(),
            "order {} completed with {} remaining",
            self.id,
            self.quantity
        );
        assert!(
            tick_taken >= self.tick_placed,
            "order {} taken at {} before being placed at {}",
            self.id,
            tick_taken,
            self.tick_placed
        );

        CompletedOrder {
            id: self.id,
            side: self.side,
            price: self.price,
            quantity: self.quantity,
            tick_placed: self.tick_placed,
            tick_taken,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price: {:.2} - Qty: {}", self.price, self.quantity)
    }
}

/// Fully filled order, as recorded in the completed log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub tick_placed: Tick,
    pub tick_taken: Tick,
}

impl fmt::Display for CompletedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Price: {:.2} - Placed: {} - Taken: {}",
            self.price, self.tick_placed, self.tick_taken
        )
    }
}
