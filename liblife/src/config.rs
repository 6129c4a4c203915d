use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: usize = 40;
pub const DEFAULT_HEIGHT: usize = 25;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
pub const DEFAULT_RANDOMIZE_PROBABILITY: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,

    /// Delay between two generations while the session is running.
    pub tick_interval_ms: u64,

    /// Chance for each cell to come alive when the board is randomized.
    pub randomize_probability: f64,
}

impl LifeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if !(0.0..=1.0).contains(&self.randomize_probability) {
            return Err(ConfigError::InvalidProbability(self.randomize_probability));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            randomize_probability: DEFAULT_RANDOMIZE_PROBABILITY,
        }
    }
}
