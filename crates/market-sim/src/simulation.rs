//! Market Simulation
//!
//! The tick scheduler. One `MarketSimulation` value owns all market state;
//! `step` is its only mutator during a run and either commits a whole tick
//! or leaves the engine marked as corrupted.

use bazaar_core::{CompletedOrder, OrderId, Order, Price, PricePoint, Quantity, Side, Tick, Trade};
use bazaar_ports::MatchingAlgorithm;
use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::generator::RandomOrderGenerator;
use crate::matching_engine::MatchingEngine;
use crate::mean_reversion::MeanReversionTracker;
use crate::news::{NewsBias, NewsBiasController, NewsDirection, NewsTransition};
use crate::order_book::OrderBook;
use crate::snapshot::{MarketSnapshot, TickReport};

/// Counters aggregated over the run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Ticks committed
    pub ticks: u64,
    /// Orders created by the generator
    pub orders_generated: u64,
    /// Orders placed from outside the generator
    pub orders_placed: u64,
    /// Transactions executed
    pub trades: u64,
    /// Units exchanged
    pub volume: u64,
    /// Orders discarded by capacity enforcement
    pub evicted: u64,
    /// Ticks with at least one transaction
    pub ticks_with_trades: u64,
    /// News shocks started
    pub news_events: u64,
}

pub struct MarketSimulation<R: Rng = StdRng> {
    config: SimulationConfig,
    rng: R,
    tick: Tick,
    current_price: Price,
    next_order_id: OrderId,
    book: OrderBook,
    completed: Vec<CompletedOrder>,
    price_history: Vec<PricePoint>,
    last_trades: Vec<Trade>,
    news: NewsBiasController,
    reversion: MeanReversionTracker,
    generator: RandomOrderGenerator,
    matching: MatchingEngine,
    stats: SimulationStats,
    corrupted: bool,
}

impl MarketSimulation<StdRng> {
    /// Create a simulation driven by a `StdRng` seeded from `seed`
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Return to the initial state, reseeding the generator
    pub fn reset(&mut self, seed: u64) {
        self.reset_with_rng(StdRng::seed_from_u64(seed));
    }
}

impl<R: Rng> MarketSimulation<R> {
    /// Create a simulation at tick 0 with all randomness drawn from `rng`
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let initial_price = config.initial_price;
        Ok(Self {
            rng,
            tick: 0,
            current_price: initial_price,
            next_order_id: 1,
            book: OrderBook::new(config.max_book_size),
            completed: Vec::new(),
            price_history: vec![PricePoint::new(0, initial_price)],
            last_trades: Vec::new(),
            news: NewsBiasController::new(config.news.clone()),
            reversion: MeanReversionTracker::new(config.mean_reversion.window),
            generator: RandomOrderGenerator::new(&config),
            matching: MatchingEngine::new(),
            stats: SimulationStats::default(),
            corrupted: false,
            config,
        })
    }

    /// Swap the transaction pricing policy
    pub fn with_matching_algorithm(mut self, algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        self.matching = MatchingEngine::with_algorithm(algorithm);
        self
    }

    /// Advance one tick and report what it produced.
    ///
    /// The report only carries this tick's activity; call
    /// [`snapshot`](Self::snapshot) between steps for the full market view.
    /// A failed step poisons the engine; every later call returns
    /// [`SimulationError::Corrupted`] until it is reset.
    pub fn step(&mut self) -> Result<TickReport> {
        if self.corrupted {
            return Err(SimulationError::Corrupted { tick: self.tick });
        }

        self.advance().inspect_err(|e| {
            self.corrupted = true;
            error!("Tick {} failed, simulation corrupted: {}", self.tick, e);
        })
    }

    fn advance(&mut self) -> Result<TickReport> {
        self.tick += 1;
        let tick = self.tick;

        // 1. News shock transition
        let news = self.news.advance(tick, &mut self.rng);
        if let NewsTransition::Activated(_) = news {
            self.stats.news_events += 1;
        }

        // 2. Mean reversion against the latest trade price
        let reversion_bias = self.reversion.update(self.current_price);

        // 3. New orders
        let count = self.generator.orders_this_tick(&mut self.rng);
        for _ in 0..count {
            let id = self.allocate_order_id();
            let order = self.generator.generate(
                tick,
                self.current_price,
                self.news.active_bias(),
                reversion_bias,
                id,
                &mut self.rng,
            );
            debug!("New {} order #{}: {}", order.side, order.id, order);
            self.book.insert(order);
        }
        self.stats.orders_generated += count as u64;

        // 4. Capacity
        let evicted = self.book.enforce_capacity(&mut self.rng);
        self.stats.evicted += evicted.len() as u64;

        // 5. Matching
        let outcome = self.matching.cross(&mut self.book, tick)?;
        if let Some(price) = outcome.last_price() {
            self.current_price = price;
            self.stats.ticks_with_trades += 1;
        }
        self.stats.trades += outcome.trades.len() as u64;
        self.stats.volume += outcome.volume();
        self.completed.extend(outcome.completed.iter().cloned());
        self.last_trades.clone_from(&outcome.trades);

        // 6. History
        self.price_history
            .push(PricePoint::new(tick, self.current_price));
        self.stats.ticks += 1;

        assert!(
            self.book.len() <= self.book.max_size(),
            "book holds {} orders after tick {}, limit {}",
            self.book.len(),
            tick,
            self.book.max_size()
        );

        trace!(
            "Tick {}: bids={}, asks={}, price={:.2}",
            tick,
            self.book.bid_count(),
            self.book.ask_count(),
            self.current_price
        );

        Ok(TickReport {
            tick,
            current_price: self.current_price,
            trades: outcome.trades,
            completed: outcome.completed,
            orders_generated: count,
            evicted: evicted.len(),
            news,
            bid_count: self.book.bid_count(),
            ask_count: self.book.ask_count(),
        })
    }

    /// Immutable copy of the current committed state
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            tick: self.tick,
            current_price: self.current_price,
            active_bids: self.book.sorted_bids(),
            active_asks: self.book.sorted_asks(),
            completed_orders: self.completed.clone(),
            news_bias: self.news.active_bias().copied(),
            running_average: self.running_average(),
            mean_reversion_bias: self.reversion.bias(),
            price_history: self.price_history.clone(),
            trades: self.last_trades.clone(),
        }
    }

    /// Rest an order in the book at the current tick.
    ///
    /// It is subject to capacity enforcement and matching on the next step.
    pub fn place_order(&mut self, side: Side, price: Price, quantity: Quantity) -> Result<OrderId> {
        if price <= Decimal::ZERO {
            return Err(SimulationError::InvalidOrder(format!(
                "price must be positive, got {}",
                price
            )));
        }
        if quantity == 0 {
            return Err(SimulationError::InvalidOrder(
                "quantity must be at least 1".to_string(),
            ));
        }

        let id = self.allocate_order_id();
        self.book
            .insert(Order::new(id, side, price, quantity, self.tick));
        self.stats.orders_placed += 1;
        Ok(id)
    }

    /// Start a news shock now, replacing any running one
    pub fn inject_news(&mut self, duration: Tick, direction: NewsDirection) -> NewsBias {
        self.stats.news_events += 1;
        self.news.activate(self.tick, duration, direction)
    }

    /// Return to the initial state with a fresh generator
    pub fn reset_with_rng(&mut self, rng: R) {
        info!("Resetting simulation at tick {}", self.tick);

        self.rng = rng;
        self.tick = 0;
        self.current_price = self.config.initial_price;
        self.next_order_id = 1;
        self.book.clear();
        self.completed.clear();
        self.price_history = vec![PricePoint::new(0, self.current_price)];
        self.last_trades.clear();
        self.news.clear();
        self.reversion.clear();
        self.stats = SimulationStats::default();
        self.corrupted = false;
    }

    fn allocate_order_id(&mut self) -> OrderId {
        let id = self.next_order_id;
        self.next_order_id += 1;
        id
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn current_price(&self) -> Price {
        self.current_price
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn completed_orders(&self) -> &[CompletedOrder] {
        &self.completed
    }

    pub fn price_history(&self) -> &[PricePoint] {
        &self.price_history
    }

    pub fn news_bias(&self) -> Option<&NewsBias> {
        self.news.active_bias()
    }

    pub fn mean_reversion_bias(&self) -> f64 {
        self.reversion.bias()
    }

    /// Mean of the trailing window, or the current price before any sample
    pub fn running_average(&self) -> Price {
        self.reversion.mean().unwrap_or(self.current_price)
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn matching_algorithm(&self) -> &str {
        self.matching.algorithm_name()
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }
}
