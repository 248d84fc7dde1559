//! Host configuration
//!
//! Loaded from JSON, then overridden field by field from the command line.
//! Every field has a default, so a partial file is enough.

use bazaar_sim::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HostError, Result};

/// Fastest tick rate the host accepts
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Console redraw throttle
pub const DEFAULT_PUBLISH_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Wall-clock time between ticks
    pub tick_interval_ms: u64,
    /// Minimum time between published snapshots
    pub publish_interval_ms: u64,
    /// RNG seed; drawn at random and logged when absent
    pub seed: Option<u64>,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Bid/ask rows shown per side when rendering
    pub display_depth: usize,
    pub simulation: SimulationConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            publish_interval_ms: DEFAULT_PUBLISH_INTERVAL_MS,
            seed: None,
            max_ticks: None,
            display_depth: 10,
            simulation: SimulationConfig::default(),
        }
    }
}

impl HostConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| HostError::ConfigIo {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HostError::ConfigParse(e.to_string()))
    }

    /// Check host limits and the nested simulation parameters
    pub fn validate(&self) -> Result<()> {
        check_tick_interval(self.tick_interval_ms)?;
        self.simulation.validate()?;
        Ok(())
    }
}

/// Parse a tick interval given as text, in whole milliseconds
pub fn parse_tick_interval(input: &str) -> Result<u64> {
    let value: u64 = input.trim().parse().map_err(|_| {
        HostError::InvalidTickInterval(format!(
            "'{}' is not a whole number of milliseconds",
            input
        ))
    })?;
    check_tick_interval(value)?;
    Ok(value)
}

fn check_tick_interval(value: u64) -> Result<()> {
    if value < MIN_TICK_INTERVAL_MS {
        return Err(HostError::TickIntervalTooShort {
            value,
            min: MIN_TICK_INTERVAL_MS,
        });
    }
    Ok(())
}
