// Collector configuration
// Controls when threshold-triggered collection kicks in

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Live object count that triggers the first automatic collection
pub const INITIAL_THRESHOLD: usize = 10000;
pub const HEAP_GROW_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcConfig {
    /// Lower bound for the automatic collection threshold
    pub initial_threshold: usize,
    /// Threshold after a cycle is `live * grow_factor`
    pub grow_factor: f64,
}

impl GcConfig {
    pub fn new(initial_threshold: usize, grow_factor: f64) -> Self {
        Self {
            initial_threshold,
            grow_factor,
        }
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: GcConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        // also rejects NaN
        if !(self.grow_factor >= 1.0) {
            return Err(ConfigError::GrowFactorTooSmall(self.grow_factor));
        }
        Ok(())
    }

    /// Threshold to use after a cycle that left `live` objects behind
    pub fn next_threshold(&self, live: usize) -> usize {
        let grown = (live as f64 * self.grow_factor) as usize;
        grown.max(self.initial_threshold)
    }
}

impl Default for GcConfig {
    fn default() -> Self {
        Self::new(INITIAL_THRESHOLD, HEAP_GROW_FACTOR)
    }
}
