use serde::{Deserialize, Serialize};

use crate::values::{OrderId, Price, Quantity, Tick};

/// Trade resulting from crossing a bid with an ask
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    /// Tick on which the transaction happened
    pub tick: Tick,
}

impl Trade {
    pub fn new(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        tick: Tick,
    ) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            tick,
        }
    }
}
