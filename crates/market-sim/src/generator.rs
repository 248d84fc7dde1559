//! Random Order Generator
//!
//! Produces limit orders scattered around the current price. The scatter is
//! Gaussian (5% of price by default) and shifted by the live news shock and
//! the mean reversion bias.

use bazaar_core::{Order, OrderId, Price, Quantity, Side, Tick};
use rand::Rng;
use rand_distr::StandardNormal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SimulationConfig;
use crate::news::NewsBias;

#[derive(Debug, Clone)]
pub struct RandomOrderGenerator {
    price_volatility: f64,
    news_impact: f64,
    reversion_strength: f64,
    min_price: Price,
    max_quantity: Quantity,
    min_orders: usize,
    max_orders: usize,
}

impl RandomOrderGenerator {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            price_volatility: config.price_volatility,
            news_impact: config.news.price_impact,
            reversion_strength: config.mean_reversion.strength,
            min_price: config.min_price,
            max_quantity: config.max_quantity,
            min_orders: config.min_orders_per_tick,
            max_orders: config.max_orders_per_tick,
        }
    }

    /// Number of orders to create this tick
    pub fn orders_this_tick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min_orders..=self.max_orders)
    }

    /// Create one order placed at `tick`.
    ///
    /// The caller owns id allocation.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        tick: Tick,
        current_price: Price,
        news_bias: Option<&NewsBias>,
        mean_reversion_bias: f64,
        id: OrderId,
        rng: &mut R,
    ) -> Order {
        let side = if rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };

        let current = current_price.to_f64().unwrap_or(0.0);
        let z: f64 = rng.sample(StandardNormal);
        let noise = z * current * self.price_volatility;

        let raw = current
            + noise
            + self.news_effect(tick, current, news_bias)
            + self.reversion_effect(current, mean_reversion_bias);
        let price = self.to_order_price(raw);

        let quantity = rng.gen_range(1..=self.max_quantity);

        Order::new(id, side, price, quantity, tick)
    }

    /// Shift from a news shock, zero unless the shock covers `tick`
    pub fn news_effect(&self, tick: Tick, current: f64, news_bias: Option<&NewsBias>) -> f64 {
        match news_bias {
            Some(bias) if bias.covers(tick) => bias.direction.sign() * current * self.news_impact,
            _ => 0.0,
        }
    }

    /// Shift pulling prices toward the trailing average
    pub fn reversion_effect(&self, current: f64, mean_reversion_bias: f64) -> f64 {
        mean_reversion_bias * current * self.reversion_strength
    }

    /// Round half-cents away from zero and floor at the minimum price
    fn to_order_price(&self, raw: f64) -> Price {
        let price = Decimal::from_f64(raw)
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        price.max(self.min_price)
    }
}
