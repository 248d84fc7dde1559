use bazaar_core::Tick;
use bazaar_ports::MatchingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Matching failed: {0}")]
    Matching(#[from] MatchingError),

    #[error("Simulation corrupted at tick {tick}, reset required")]
    Corrupted { tick: Tick },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
