//! Read-only views of committed state.
//!
//! Everything here is an owned copy; later steps never show through.
//! [`TickReport`] holds only what one tick produced and is cheap to build on
//! every step. [`MarketSnapshot`] copies the whole market, including the
//! growing history and completed log, and is taken on demand between steps.

use bazaar_core::{CompletedOrder, Order, Price, PricePoint, Tick, Trade};
use serde::{Deserialize, Serialize};

use crate::news::{NewsBias, NewsTransition};

/// What a single `step` did
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// Market price after matching
    pub current_price: Price,
    /// Transactions of this tick, in execution order
    pub trades: Vec<Trade>,
    /// Orders filled on this tick
    pub completed: Vec<CompletedOrder>,
    pub orders_generated: usize,
    pub evicted: usize,
    pub news: NewsTransition,
    pub bid_count: usize,
    pub ask_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub tick: Tick,
    pub current_price: Price,
    /// Bids, best (highest) first
    pub active_bids: Vec<Order>,
    /// Asks, best (lowest) first
    pub active_asks: Vec<Order>,
    pub completed_orders: Vec<CompletedOrder>,
    pub news_bias: Option<NewsBias>,
    /// Mean of the trailing price window (current price before any sample)
    pub running_average: Price,
    pub mean_reversion_bias: f64,
    pub price_history: Vec<PricePoint>,
    /// Transactions of this tick, in execution order
    pub trades: Vec<Trade>,
}

impl MarketSnapshot {
    pub fn best_bid(&self) -> Option<&Order> {
        self.active_bids.first()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.active_asks.first()
    }

    /// Best ask minus best bid, when both sides are quoted
    pub fn spread(&self) -> Option<Price> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    /// Combined number of resting orders
    pub fn book_size(&self) -> usize {
        self.active_bids.len() + self.active_asks.len()
    }
}
