//! Bazaar Runner - console host for the market simulation
//!
//! Wraps the synchronous `bazaar-sim` core in an async driver:
//!
//! - **Config**: JSON file plus command-line overrides
//! - **Host**: interval timer, single engine lock, throttled snapshot feed
//! - **Render**: text view of the book for the terminal
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐  tick   ┌───────────────────────────┐
//!   │ tokio        │───────► │ Mutex<MarketSimulation>   │
//!   │ interval     │         │   step() -> snapshot      │
//!   └──────────────┘         └─────────────┬─────────────┘
//!          ▲                               │ throttled
//!          │ stop                          ▼
//!   ┌──────┴───────┐         ┌───────────────────────────┐
//!   │ StopHandle   │         │ broadcast<MarketSnapshot> │
//!   │ (Ctrl-C)     │         │   -> console renderer     │
//!   └──────────────┘         └───────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod render;

// Re-export main types
pub use cli::{Command, parse_args};
pub use config::{HostConfig, MIN_TICK_INTERVAL_MS, parse_tick_interval};
pub use error::{HostError, Result};
pub use host::{HostReport, SimulationHost, StopHandle, StopReason};
pub use render::render_snapshot;
