//! Mean Reversion Tracker
//!
//! Trailing window of trade prices with a running sum for O(1) mean
//! updates. The published bias is the relative distance from the current
//! price to the window mean: positive when price sits below its average.

use bazaar_core::Price;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct MeanReversionTracker {
    /// Prices in the window, oldest first
    prices: VecDeque<Price>,
    window_size: usize,
    /// Running sum of `prices`
    sum: Price,
    bias: f64,
}

impl MeanReversionTracker {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            prices: VecDeque::with_capacity(window_size),
            window_size,
            sum: Decimal::ZERO,
            bias: 0.0,
        }
    }

    /// Push the latest trade price and recompute the bias against it
    pub fn update(&mut self, price: Price) -> f64 {
        if self.prices.len() >= self.window_size {
            if let Some(removed) = self.prices.pop_front() {
                self.sum -= removed;
            }
        }
        self.prices.push_back(price);
        self.sum += price;

        self.bias = self.bias_against(price);
        self.bias
    }

    /// `(mean - price) / price`, zero without samples or with a zero price
    pub fn bias_against(&self, price: Price) -> f64 {
        match self.mean() {
            Some(mean) if !price.is_zero() => ((mean - price) / price).to_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Bias published by the latest update
    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Arithmetic mean of the window
    pub fn mean(&self) -> Option<Price> {
        if self.prices.is_empty() {
            return None;
        }
        Some(self.sum / Decimal::from(self.prices.len()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.prices.len() >= self.window_size
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn clear(&mut self) {
        self.prices.clear();
        self.sum = Decimal::ZERO;
        self.bias = 0.0;
    }
}
