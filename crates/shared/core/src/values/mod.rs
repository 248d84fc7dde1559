use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price value - uses Decimal for precision
/// Generated order prices carry two decimal places; trade prices may carry
/// more when a midpoint is taken.
pub type Price = Decimal;

/// Quantity value - whole units, never negative
pub type Quantity = u32;

/// Discrete simulation step
pub type Tick = u64;

/// Monotonic order identifier, never reused within a run
pub type OrderId = u64;

/// One point of the price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub tick: Tick,
    pub price: Price,
}

impl PricePoint {
    pub fn new(tick: Tick, price: Price) -> Self {
        Self { tick, price }
    }
}
