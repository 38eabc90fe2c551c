//! Snap engine configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::input::OverrideModifier;
use crate::snap::DEFAULT_SNAP_THRESHOLD;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the draggable element sits before its first drag.
pub const DEFAULT_INITIAL_POSITION: Point = Point::new(100.0, 100.0);

/// Configuration for the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Edges closer than this (in canvas units) snap.
    pub threshold: f64,
    /// Modifier that disables snapping while held.
    pub override_modifier: OverrideModifier,
    /// Canvas-local position of the draggable element before any drag.
    pub initial_position: Point,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SNAP_THRESHOLD,
            override_modifier: OverrideModifier::default(),
            initial_position: DEFAULT_INITIAL_POSITION,
        }
    }
}

impl SnapConfig {
    /// Create a configuration with the given threshold and defaults elsewhere.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject thresholds that would make the snap decision meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
