//! Bazaar Core Domain
//!
//! Pure domain types for the Bazaar market simulator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{CompletedOrder, Order, Side, Trade};
pub use values::{OrderId, Price, PricePoint, Quantity, Tick};
