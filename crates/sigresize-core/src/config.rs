//! Pipeline configuration.
//!
//! All fields have defaults matching the shipped behaviour: quality 90 for
//! unconstrained encodes, a 5..=100 search in steps of 5, and bilinear
//! resampling.

use serde::{Deserialize, Serialize};

use crate::decode::{DecodeLimits, FilterType};
use crate::encode::{QualitySearch, DEFAULT_QUALITY_FLOOR, DEFAULT_QUALITY_STEP, MAX_QUALITY};
use crate::error::ConfigError;

/// Quality used when a request carries no size ceiling.
pub const DEFAULT_QUALITY: u8 = 90;

/// Settings for a `TranscodePipeline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// JPEG quality for requests without `max_size_bytes`.
    pub default_quality: u8,
    /// Lowest quality the size search may use.
    pub quality_floor: u8,
    /// Distance between qualities tried by the size search.
    pub quality_step: u8,
    /// Resampling filter for resizes.
    pub filter: FilterType,
    /// Limits applied to source images.
    pub limits: DecodeLimits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_quality: DEFAULT_QUALITY,
            quality_floor: DEFAULT_QUALITY_FLOOR,
            quality_step: DEFAULT_QUALITY_STEP,
            filter: FilterType::default(),
            limits: DecodeLimits::default(),
        }
    }
}

impl PipelineConfig {
    /// Check every setting is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |q: u8| (1..=MAX_QUALITY).contains(&q);

        if !in_range(self.default_quality) {
            return Err(ConfigError::InvalidSetting(format!(
                "default_quality must be 1-100, got {}",
                self.default_quality
            )));
        }
        if !in_range(self.quality_floor) {
            return Err(ConfigError::InvalidSetting(format!(
                "quality_floor must be 1-100, got {}",
                self.quality_floor
            )));
        }
        if self.quality_step == 0 {
            return Err(ConfigError::InvalidSetting(
                "quality_step must be at least 1".to_string(),
            ));
        }
        if self.limits.max_width == 0 || self.limits.max_height == 0 {
            return Err(ConfigError::InvalidSetting(
                "decode limits must allow a non-zero width and height".to_string(),
            ));
        }
        if self.limits.max_alloc_bytes == 0 {
            return Err(ConfigError::InvalidSetting(
                "decode limits must allow a non-zero allocation".to_string(),
            ));
        }
        Ok(())
    }

    /// Search bounds derived from the floor and step.
    pub fn search(&self) -> QualitySearch {
        QualitySearch::new(self.quality_floor, self.quality_step)
    }
}
