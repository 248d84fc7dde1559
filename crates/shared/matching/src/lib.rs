//! Bazaar Matching Algorithms
//!
//! Implementations of order matching algorithms for the Bazaar market simulator.

mod price_time;

pub use price_time::PriceTimeMatchingEngine;

// Re-export the trait from ports for convenience
pub use bazaar_ports::{MatchingAlgorithm, MatchingError, MatchingResult};
