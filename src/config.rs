use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;

#[cfg(test)]
mod tests;

/// Tunable thresholds for one engine. Immutable once the engine is built.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Number of pointer slots; contacts beyond this are ignored.
    pub max_pointers: usize,
    /// Probe the hit tester only on acquisition and release instead of every tick.
    pub minimal_hit_testing: bool,
    /// Presses shorter than this are taps, longer ones become long presses.
    pub max_tap_ms: u64,
    /// Window after a tap during which another tap on the same slot extends the sequence.
    pub max_consecutive_tap_gap_ms: u64,
    /// Presses shorter than this raise `SuspiciousBehavior`.
    pub suspicious_tap_ms: u64,
    /// Per-tick movement at or below this radius counts as stationary (pixels).
    pub stationary_radius: f32,
    /// Slides completing faster than this may classify as swipes.
    pub max_swipe_ms: u64,
    /// Minimum start-to-end travel of a swipe (pixels).
    pub min_swipe_distance: f32,
}

pub const DEFAULT_CONFIG: GestureConfig = GestureConfig {
    max_pointers: 2,
    minimal_hit_testing: true,
    max_tap_ms: 500,
    max_consecutive_tap_gap_ms: 500,
    suspicious_tap_ms: 30,
    stationary_radius: 3.0,
    max_swipe_ms: 500,
    min_swipe_distance: 20.0,
};

impl Default for GestureConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl GestureConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GestureConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pointers == 0 {
            return Err(validation("max_pointers must be >= 1"));
        }
        if self.max_pointers > u16::MAX as usize {
            return Err(validation("max_pointers must fit a u16 slot index"));
        }
        if self.max_tap_ms == 0 {
            return Err(validation("max_tap_ms must be > 0"));
        }
        if self.suspicious_tap_ms > self.max_tap_ms {
            return Err(validation("suspicious_tap_ms must be <= max_tap_ms"));
        }
        if !self.stationary_radius.is_finite() || self.stationary_radius < 0.0 {
            return Err(validation(
                "stationary_radius must be a finite, non-negative distance",
            ));
        }
        if !self.min_swipe_distance.is_finite() || self.min_swipe_distance < 0.0 {
            return Err(validation(
                "min_swipe_distance must be a finite, non-negative distance",
            ));
        }
        Ok(())
    }

    pub(crate) fn stationary_radius_sq(&self) -> f32 {
        self.stationary_radius * self.stationary_radius
    }

    pub(crate) fn min_swipe_distance_sq(&self) -> f32 {
        self.min_swipe_distance * self.min_swipe_distance
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::Validation(message.to_owned())
}
