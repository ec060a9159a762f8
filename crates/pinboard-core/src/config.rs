//! Interaction tuning.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Thresholds and limits used by the interaction state machine.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pointer travel (page units) before a press becomes a drag.
    pub drag_threshold: f64,
    /// Hold time before a still press becomes a long press.
    pub long_press_ms: u64,
    /// Hit radius around handles (page units).
    pub handle_hit_tolerance: f64,
    /// Maximum number of shapes on the page.
    pub max_shapes: usize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 4.0,
            long_press_ms: 500,
            handle_hit_tolerance: 8.0,
            max_shapes: 4000,
        }
    }
}

impl InteractionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded interaction config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.drag_threshold.is_finite() && self.drag_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "drag_threshold must be positive, got {}",
                self.drag_threshold
            )));
        }
        if self.long_press_ms == 0 {
            return Err(ConfigError::Invalid("long_press_ms must be non-zero".to_string()));
        }
        if !(self.handle_hit_tolerance.is_finite() && self.handle_hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "handle_hit_tolerance must not be negative, got {}",
                self.handle_hit_tolerance
            )));
        }
        if self.max_shapes == 0 {
            return Err(ConfigError::Invalid("max_shapes must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }
}
