//! Segmentation configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration for segmentation and packing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SegmentationConfig {
    /// Maximum billable duration per generated clip in seconds, imposed by
    /// the generation API
    pub unit_cap: f64,
    /// Seconds of intentional overlap between consecutive chunks
    pub chunk_overlap: f64,
    /// Nominal chunk length in seconds (the cap minus a processing buffer)
    pub chunk_target: f64,
    /// Scenes shorter than this floor are merged into a neighbor
    pub min_scene_duration: f64,
    /// Buffer kept free when packing, to tolerate generation-duration
    /// rounding
    pub packing_safety_margin: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        let unit_cap = 8.0;
        let chunk_overlap = 1.0;
        Self {
            unit_cap,
            chunk_overlap,
            chunk_target: unit_cap - chunk_overlap,
            min_scene_duration: 0.3,
            packing_safety_margin: 0.5,
        }
    }
}

impl SegmentationConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let unit_cap = env_f64("VGEN_UNIT_CAP").unwrap_or(defaults.unit_cap);
        let chunk_overlap = env_f64("VGEN_CHUNK_OVERLAP").unwrap_or(defaults.chunk_overlap);
        Self {
            unit_cap,
            chunk_overlap,
            chunk_target: env_f64("VGEN_CHUNK_TARGET").unwrap_or(unit_cap - chunk_overlap),
            min_scene_duration: env_f64("VGEN_MIN_SCENE_DURATION")
                .unwrap_or(defaults.min_scene_duration),
            packing_safety_margin: env_f64("VGEN_PACKING_SAFETY_MARGIN")
                .unwrap_or(defaults.packing_safety_margin),
        }
    }

    /// Check the configuration for combinations the algorithms cannot
    /// handle. Returns a human-readable description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.unit_cap <= 0.0 {
            return Err(format!("unit_cap must be positive, got {}", self.unit_cap));
        }
        if self.chunk_overlap < 0.0 {
            return Err(format!(
                "chunk_overlap must be non-negative, got {}",
                self.chunk_overlap
            ));
        }
        if self.chunk_target <= self.chunk_overlap {
            return Err(format!(
                "chunk_target ({}) must exceed chunk_overlap ({})",
                self.chunk_target, self.chunk_overlap
            ));
        }
        if self.chunk_target > self.unit_cap {
            return Err(format!(
                "chunk_target ({}) must not exceed unit_cap ({})",
                self.chunk_target, self.unit_cap
            ));
        }
        if self.min_scene_duration < 0.0 {
            return Err(format!(
                "min_scene_duration must be non-negative, got {}",
                self.min_scene_duration
            ));
        }
        if self.packing_safety_margin < 0.0 || self.packing_safety_margin >= self.unit_cap {
            return Err(format!(
                "packing_safety_margin ({}) must be in [0, unit_cap)",
                self.packing_safety_margin
            ));
        }
        Ok(())
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = SegmentationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.unit_cap, 8.0);
        assert_eq!(cfg.chunk_target, 7.0);
    }

    #[test]
    fn test_validate_rejects_overlap_ge_target() {
        let cfg = SegmentationConfig {
            chunk_target: 1.0,
            chunk_overlap: 1.0,
            ..SegmentationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_cap() {
        let cfg = SegmentationConfig {
            unit_cap: 0.0,
            ..SegmentationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
