//! Simulation configuration
//!
//! Every knob has a default matching the reference market: price 100.00,
//! a 100-order book, 1-3 orders per tick, 5% price noise, news shocks of
//! ±2% with a 1/500 chance per tick, and a 1000-price reversion window.

use bazaar_core::{Price, Quantity, Tick};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Root configuration for the simulation core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Price at tick 0
    pub initial_price: Price,
    /// Maximum combined number of active bids and asks
    pub max_book_size: usize,
    /// Fewest orders generated per tick
    pub min_orders_per_tick: usize,
    /// Most orders generated per tick
    pub max_orders_per_tick: usize,
    /// Largest quantity of a generated order (smallest is 1)
    pub max_quantity: Quantity,
    /// Standard deviation of order price noise, as a fraction of price
    pub price_volatility: f64,
    /// Floor for generated order prices
    pub min_price: Price,
    pub news: NewsBiasConfig,
    pub mean_reversion: MeanReversionConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_price: dec!(100.00),
            max_book_size: 100,
            min_orders_per_tick: 1,
            max_orders_per_tick: 3,
            max_quantity: 10,
            price_volatility: 0.05,
            min_price: dec!(0.01),
            news: NewsBiasConfig::default(),
            mean_reversion: MeanReversionConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Check ranges before the engine is built
    pub fn validate(&self) -> Result<()> {
        if self.initial_price <= Decimal::ZERO {
            return Err(invalid(format!(
                "initial_price must be positive, got {}",
                self.initial_price
            )));
        }
        if self.min_price <= Decimal::ZERO {
            return Err(invalid(format!(
                "min_price must be positive, got {}",
                self.min_price
            )));
        }
        if self.max_book_size == 0 {
            return Err(invalid("max_book_size must be at least 1"));
        }
        if self.min_orders_per_tick > self.max_orders_per_tick {
            return Err(invalid(format!(
                "orders per tick range is inverted: {}..={}",
                self.min_orders_per_tick, self.max_orders_per_tick
            )));
        }
        if self.max_quantity == 0 {
            return Err(invalid("max_quantity must be at least 1"));
        }
        if !self.price_volatility.is_finite() || self.price_volatility < 0.0 {
            return Err(invalid(format!(
                "price_volatility must be finite and non-negative, got {}",
                self.price_volatility
            )));
        }
        self.news.validate()?;
        self.mean_reversion.validate()
    }
}

/// News shock process parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsBiasConfig {
    /// Chance per inactive tick that a shock starts
    pub activation_probability: f64,
    /// Longest shock, in ticks (shortest is 1)
    pub max_duration: Tick,
    /// Price shift applied to generated orders, as a fraction of price
    pub price_impact: f64,
}

impl Default for NewsBiasConfig {
    fn default() -> Self {
        Self {
            activation_probability: 1.0 / 500.0,
            max_duration: 500,
            price_impact: 0.02,
        }
    }
}

impl NewsBiasConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.activation_probability) {
            return Err(invalid(format!(
                "news activation_probability must be within [0, 1], got {}",
                self.activation_probability
            )));
        }
        if self.max_duration == 0 {
            return Err(invalid("news max_duration must be at least 1"));
        }
        if !self.price_impact.is_finite() {
            return Err(invalid("news price_impact must be finite"));
        }
        Ok(())
    }
}

/// Trailing-average pull parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanReversionConfig {
    /// Number of trailing prices averaged
    pub window: usize,
    /// Weight of the reversion bias on generated prices
    pub strength: f64,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            window: 1000,
            strength: 0.03,
        }
    }
}

impl MeanReversionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(invalid("mean_reversion window must be at least 1"));
        }
        if !self.strength.is_finite() {
            return Err(invalid("mean_reversion strength must be finite"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfig(msg.into())
}
