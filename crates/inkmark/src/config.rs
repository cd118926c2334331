//! Tunable parameters for every pipeline stage.
//!
//! Defaults reproduce the thresholds the scale range and the shipped models
//! were fitted with; changing them invalidates trained models.

use std::path::Path;

/// Acceptance rules applied when a stroke is offered to a region.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RegionFilterConfig {
    /// Samples closer than this to the previous kept sample are removed
    /// before the centroid test.
    pub duplicate_threshold: f64,
    /// Minimum number of valid points an accepted stroke must carry.
    pub min_valid_points: usize,
}

impl Default for RegionFilterConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: 5.0,
            min_valid_points: 5,
        }
    }
}

/// Normalization applied to every candidate sequence before feature extraction.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Side of the square frame the longer sequence dimension is mapped to.
    pub frame_size: f64,
    /// Weights applied to (previous, current, next) when smoothing.
    pub smoothing_weights: [f64; 3],
    /// First-pass near-duplicate threshold in frame units.
    pub dedup_threshold: f64,
    /// Minimum arc length per point; below it the coarse pass runs.
    pub min_density: f64,
    /// Near-duplicate threshold of the coarse pass.
    pub coarse_dedup_threshold: f64,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            frame_size: 100.0,
            smoothing_weights: [0.25, 0.5, 0.25],
            dedup_threshold: 2.0,
            min_density: 6.0,
            coarse_dedup_threshold: 6.0,
        }
    }
}

/// Geometry of the baseline-angle bands and the ink canvas.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Inclusive degree band counted by the third feature.
    pub band_a_deg: [f64; 2],
    /// Inclusive degree band counted by the fourth feature.
    pub band_b_deg: [f64; 2],
    /// Fraction the `2 * mean distance` canvas side is shrunk by.
    pub canvas_shrink: f64,
    /// Pen width as a fraction of the canvas side.
    pub pen_width_ratio: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            band_a_deg: [10.0, 80.0],
            band_b_deg: [100.0, 170.0],
            canvas_shrink: 0.2,
            pen_width_ratio: 0.08,
        }
    }
}

/// Stitcher gates.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// A peeled tail whose predicted-label probability (0..100) is below
    /// this value is treated as unclassified while strokes remain in front
    /// of it.
    pub min_tail_confidence: f64,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            min_tail_confidence: 85.0,
        }
    }
}

/// Top-level recognition configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecognizeConfig {
    pub region: RegionFilterConfig,
    pub preprocess: PreprocessConfig,
    pub features: FeatureConfig,
    pub stitch: StitchConfig,
}

impl RecognizeConfig {
    /// Load a configuration from JSON; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
