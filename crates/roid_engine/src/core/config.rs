//! # Engine Configuration
//!
//! Core runtime settings shared by every game built on the engine: logging,
//! the fixed simulation step and the random seed handed to the world.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core engine behavior configuration including logging, the simulation step
/// and determinism settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// Seed for the world's random source; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: 1.0 / 60.0,
            seed: None,
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the fixed timestep
    #[must_use]
    pub fn with_fixed_timestep(mut self, dt: f32) -> Self {
        self.fixed_timestep = dt;
        self
    }

    /// Seed the world's random source
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be a positive number, got {}",
                self.fixed_timestep
            )));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
