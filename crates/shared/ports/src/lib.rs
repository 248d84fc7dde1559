//! Bazaar Ports
//!
//! Port definitions (traits) for the Bazaar market simulator.
//! These define the boundaries between the simulation loop and swappable policy.

mod error;
mod matching;

pub use error::{MatchingError, MatchingResult};
pub use matching::MatchingAlgorithm;
