//! Order Book
//!
//! Two unordered collections of resting orders. Ordering is applied on
//! read: bids by descending price, asks by ascending price, ties broken by
//! earlier placement and then by id.
//!
//! The book holds at most `max_size` orders once capacity is enforced.
//! Excess orders are evicted at random and discarded; an eviction is not a
//! fill and never reaches the completed log.

use bazaar_core::{Order, Side};
use log::debug;
use rand::Rng;
use std::cmp::Ordering;

/// Bid priority: higher price first, then earlier tick, then lower id
pub fn bid_priority(a: &Order, b: &Order) -> Ordering {
    b.price
        .cmp(&a.price)
        .then(a.tick_placed.cmp(&b.tick_placed))
        .then(a.id.cmp(&b.id))
}

/// Ask priority: lower price first, then earlier tick, then lower id
pub fn ask_priority(a: &Order, b: &Order) -> Ordering {
    a.price
        .cmp(&b.price)
        .then(a.tick_placed.cmp(&b.tick_placed))
        .then(a.id.cmp(&b.id))
}

#[derive(Debug, Clone)]
pub struct OrderBook {
    bids: Vec<Order>,
    asks: Vec<Order>,
    max_size: usize,
}

impl OrderBook {
    pub fn new(max_size: usize) -> Self {
        Self {
            bids: Vec::with_capacity(max_size),
            asks: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Append an order to its side
    pub fn insert(&mut self, order: Order) {
        assert!(
            order.is_active(),
            "inactive order {} inserted into the book",
            order.id
        );
        match order.side {
            Side::Buy => self.bids.push(order),
            Side::Sell => self.asks.push(order),
        }
    }

    /// Combined number of resting orders
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Copy of the bids in priority order
    pub fn sorted_bids(&self) -> Vec<Order> {
        let mut bids = self.bids.clone();
        bids.sort_by(bid_priority);
        bids
    }

    /// Copy of the asks in priority order
    pub fn sorted_asks(&self) -> Vec<Order> {
        let mut asks = self.asks.clone();
        asks.sort_by(ask_priority);
        asks
    }

    /// Best (highest) bid
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.iter().min_by(|a, b| bid_priority(a, b))
    }

    /// Best (lowest) ask
    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.iter().min_by(|a, b| ask_priority(a, b))
    }

    /// Move both sides out of the book, each sorted by priority
    pub(crate) fn take_sorted(&mut self) -> (Vec<Order>, Vec<Order>) {
        let mut bids = std::mem::take(&mut self.bids);
        let mut asks = std::mem::take(&mut self.asks);
        bids.sort_by(bid_priority);
        asks.sort_by(ask_priority);
        (bids, asks)
    }

    /// Put resting orders back after a matching pass
    pub(crate) fn restore(&mut self, bids: Vec<Order>, asks: Vec<Order>) {
        debug_assert!(self.bids.is_empty() && self.asks.is_empty());
        self.bids = bids;
        self.asks = asks;
    }

    /// Randomly evict orders until the book fits its capacity.
    ///
    /// Each eviction picks a side with equal odds (the non-empty side if one
    /// is empty) and removes a uniformly chosen order from it. Returns the
    /// evicted orders.
    pub fn enforce_capacity<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Order> {
        let mut evicted = Vec::new();

        while self.len() > self.max_size {
            let from_bids = match (self.bids.is_empty(), self.asks.is_empty()) {
                (false, true) => true,
                (true, false) => false,
                _ => rng.gen_bool(0.5),
            };
            let side = if from_bids {
                &mut self.bids
            } else {
                &mut self.asks
            };
            let index = rng.gen_range(0..side.len());
            evicted.push(side.remove(index));
        }

        if !evicted.is_empty() {
            debug!(
                "Evicted {} orders to hold book at {} (bids={}, asks={})",
                evicted.len(),
                self.max_size,
                self.bids.len(),
                self.asks.len()
            );
        }

        evicted
    }

    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }
}
