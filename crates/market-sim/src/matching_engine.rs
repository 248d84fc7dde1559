//! Matching Engine
//!
//! Walks the book under price-time priority. The pricing rule comes from a
//! [`MatchingAlgorithm`] (standing order price by default); this module owns
//! the loop, fill bookkeeping, and migration of filled orders.

use bazaar_core::{CompletedOrder, Order, Price, Tick, Trade};
use bazaar_matching::PriceTimeMatchingEngine;
use bazaar_ports::{MatchingAlgorithm, MatchingResult};
use log::debug;
use std::collections::VecDeque;

use crate::order_book::OrderBook;

/// Result of one crossing pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossOutcome {
    /// Transactions in execution order
    pub trades: Vec<Trade>,
    /// Orders filled during the pass, stamped with the pass tick
    pub completed: Vec<CompletedOrder>,
}

impl CrossOutcome {
    /// True if at least one transaction occurred
    pub fn traded(&self) -> bool {
        !self.trades.is_empty()
    }

    /// Price of the last transaction, the new market price
    pub fn last_price(&self) -> Option<Price> {
        self.trades.last().map(|t| t.price)
    }

    /// Units exchanged during the pass
    pub fn volume(&self) -> u64 {
        self.trades.iter().map(|t| u64::from(t.quantity)).sum()
    }
}

pub struct MatchingEngine {
    algorithm: Box<dyn MatchingAlgorithm>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::with_algorithm(Box::new(PriceTimeMatchingEngine::new()))
    }

    pub fn with_algorithm(algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self { algorithm }
    }

    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    /// Cross the book until the best bid no longer reaches the best ask.
    ///
    /// Both sides are sorted into local views first; unfilled and partially
    /// filled orders go back into the book afterwards, including when the
    /// algorithm reports an error.
    pub fn cross(&mut self, book: &mut OrderBook, tick: Tick) -> MatchingResult<CrossOutcome> {
        let (bids, asks) = book.take_sorted();
        let mut bids = VecDeque::from(bids);
        let mut asks = VecDeque::from(asks);

        let result = self.cross_sorted(&mut bids, &mut asks, tick);

        book.restore(bids.into(), asks.into());
        result
    }

    fn cross_sorted(
        &mut self,
        bids: &mut VecDeque<Order>,
        asks: &mut VecDeque<Order>,
        tick: Tick,
    ) -> MatchingResult<CrossOutcome> {
        let mut outcome = CrossOutcome::default();

        while let (Some(bid), Some(ask)) = (bids.front(), asks.front()) {
            if !self.algorithm.can_match(bid, ask) {
                break;
            }

            let (trade, bid_left, ask_left) = self.algorithm.match_orders(bid, ask, tick)?;
            debug!(
                "Transaction: {} units at {:.2} (bid #{}, ask #{})",
                trade.quantity, trade.price, trade.buy_order_id, trade.sell_order_id
            );

            if let Some(bid) = bids.front_mut() {
                bid.fill(trade.quantity);
                assert_eq!(bid.quantity, bid_left, "bid #{} remaining mismatch", bid.id);
            }
            if let Some(ask) = asks.front_mut() {
                ask.fill(trade.quantity);
                assert_eq!(ask.quantity, ask_left, "ask #{} remaining mismatch", ask.id);
            }

            // Partially filled orders stay at the head and can match again
            if bid_left == 0 {
                if let Some(filled) = bids.pop_front() {
                    outcome.completed.push(Self::complete(filled, tick));
                }
            }
            if ask_left == 0 {
                if let Some(filled) = asks.pop_front() {
                    outcome.completed.push(Self::complete(filled, tick));
                }
            }

            outcome.trades.push(trade);
        }

        Ok(outcome)
    }

    fn complete(filled: Order, tick: Tick) -> CompletedOrder {
        let done = filled.complete(tick);
        debug!("Order #{} {} filled: {}", done.id, done.side, done);
        done
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
