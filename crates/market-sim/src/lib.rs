//! Bazaar Market Simulation
//!
//! Tick-driven simulation of a single-instrument continuous double auction:
//!
//! - **Generator**: random limit orders around the current price
//! - **News**: temporary directional price pressure
//! - **Mean Reversion**: pull toward the trailing average price
//! - **Order Book**: bounded bids/asks with random eviction
//! - **Matching Engine**: price-time priority crossing
//! - **Simulation**: the per-tick scheduler and snapshot producer
//!
//! ## Tick pipeline
//!
//! ```text
//!   news.advance ─► reversion.update ─► generate 1..3 orders ─► book.insert
//!                                                                  │
//!   TickReport ◄─ history.push ◄─ matching.cross ◄─ enforce_capacity ◄┘
//! ```
//!
//! The core is synchronous and single-threaded. All randomness flows
//! through the one generator handed to [`MarketSimulation::new`], so a
//! seeded run is fully reproducible.

pub mod config;
pub mod error;
pub mod generator;
pub mod matching_engine;
pub mod mean_reversion;
pub mod news;
pub mod order_book;
pub mod simulation;
pub mod snapshot;

// Re-export main types
pub use config::{MeanReversionConfig, NewsBiasConfig, SimulationConfig};
pub use error::{Result, SimulationError};
pub use generator::RandomOrderGenerator;
pub use matching_engine::{CrossOutcome, MatchingEngine};
pub use mean_reversion::MeanReversionTracker;
pub use news::{NewsBias, NewsBiasController, NewsDirection, NewsTransition};
pub use order_book::OrderBook;
pub use simulation::{MarketSimulation, SimulationStats};
pub use snapshot::{MarketSnapshot, TickReport};

// Re-export domain types for convenience
pub use bazaar_core::{CompletedOrder, Order, OrderId, Price, PricePoint, Quantity, Side, Tick, Trade};
