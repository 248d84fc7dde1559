use bazaar_core::{Order, Price, Quantity, Tick, Trade};

use crate::error::MatchingResult;

/// Port for order matching algorithms
///
/// An algorithm decides whether a bid and an ask cross and at which price
/// they trade. Walking the book is the caller's job.
pub trait MatchingAlgorithm: Send {
    /// Check if two orders can match
    fn can_match(&self, bid: &Order, ask: &Order) -> bool;

    /// Price at which a crossing bid and ask transact
    fn execution_price(&self, bid: &Order, ask: &Order) -> Price;

    /// Match two orders and return the resulting trade and remaining quantities
    ///
    /// Returns: (trade, bid_remaining_qty, ask_remaining_qty)
    fn match_orders(
        &self,
        bid: &Order,
        ask: &Order,
        tick: Tick,
    ) -> MatchingResult<(Trade, Quantity, Quantity)>;

    /// Get the name of the algorithm
    fn name(&self) -> &str;
}
