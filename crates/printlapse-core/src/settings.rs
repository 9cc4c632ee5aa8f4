//! Import settings for the G-code pipeline
//!
//! Holds the knobs the importer exposes to the user: whether long segments
//! get subdivided and at what length, and whether the exported path is
//! grouped per layer or emitted as one continuous polyline.
//!
//! Settings are serde-backed and can be persisted as JSON.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum accepted subdivision threshold, in G-code coordinate units
pub const MIN_SEGMENT_SIZE: f64 = 0.1;

/// Maximum accepted subdivision threshold
pub const MAX_SEGMENT_SIZE: f64 = 999.0;

/// User-facing settings for a G-code import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Group the exported path per detected print layer instead of one
    /// continuous polyline
    pub split_layers: bool,
    /// Subdivide motion segments longer than `max_segment_size`
    pub subdivide: bool,
    /// Only segments strictly longer than this are subdivided
    pub max_segment_size: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            split_layers: true,
            subdivide: false,
            max_segment_size: 1.0,
        }
    }
}

impl ImportSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create settings with subdivision enabled at the given threshold
    pub fn with_subdivision(threshold: f64) -> Self {
        Self {
            subdivide: true,
            max_segment_size: threshold,
            ..Self::default()
        }
    }

    /// Validate all settings values
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.max_segment_size.is_finite() {
            return Err(ConfigError::InvalidSetting {
                key: "max_segment_size".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if self.max_segment_size < MIN_SEGMENT_SIZE {
            return Err(ConfigError::InvalidSetting {
                key: "max_segment_size".to_string(),
                reason: format!("must be at least {}", MIN_SEGMENT_SIZE),
            });
        }
        if self.max_segment_size > MAX_SEGMENT_SIZE {
            return Err(ConfigError::InvalidSetting {
                key: "max_segment_size".to_string(),
                reason: format!("must be at most {}", MAX_SEGMENT_SIZE),
            });
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
