//! Cave generation parameters and configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest map side that can hold the 3x3 seed block.
pub const MIN_MAP_SIDE: usize = 3;

/// Parameters for one cave map generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    /// Map width in cells (default: 160)
    pub width: usize,

    /// Map height in cells (default: 160)
    pub height: usize,

    /// Probability that a freshly seeded cell is a wall (0.0-1.0)
    pub wall_probability: f32,

    /// Number of cellular automaton smoothing passes (default: 4)
    pub smoothing_iterations: usize,

    /// A cell becomes wall when its 3x3 block holds more than this many walls
    pub smoothing_threshold: u8,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            width: 160,
            height: 160,
            wall_probability: 0.45,
            smoothing_iterations: 4,
            smoothing_threshold: 4,
        }
    }
}

impl CaveParams {
    /// Load parameters from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let unreadable = |message: String| ConfigError::Unreadable {
            path: path.display().to_string(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| unreadable(e.to_string()))
    }

    /// Reject parameters the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_MAP_SIDE || self.height < MIN_MAP_SIDE {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min: MIN_MAP_SIDE,
            });
        }
        if !self.wall_probability.is_finite() || !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(ConfigError::InvalidWallProbability(self.wall_probability));
        }
        if self.smoothing_threshold > 9 {
            return Err(ConfigError::InvalidThreshold(self.smoothing_threshold));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
