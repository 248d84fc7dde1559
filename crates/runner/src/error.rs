use bazaar_sim::SimulationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Invalid tick interval: {0}")]
    InvalidTickInterval(String),

    #[error("Tick interval {value}ms is below the {min}ms minimum")]
    TickIntervalTooShort { value: u64, min: u64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read config file {path}: {error}")]
    ConfigIo { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

pub type Result<T> = std::result::Result<T, HostError>;
