//! Fixed-size geometric description of a candidate gesture.
//!
//! Feature order is part of the model contract:
//!
//! | index | feature                                  |
//! |-------|------------------------------------------|
//! | 0     | variance of turning-angle changes        |
//! | 1     | mean baseline angle (degrees)            |
//! | 2     | % of baseline angles in band A           |
//! | 3     | % of baseline angles in band B           |
//! | 4     | % of canvas covered by ink               |

mod angles;
mod ink;

use angles::{angle_change_variance, baseline_angles};
use ink::ink_density;

use crate::config::{FeatureConfig, RecognizeConfig};
use crate::geometry::{InkPoint, Stroke};
use crate::preprocess::preprocess;

/// Number of features produced per sequence.
pub const FEATURE_COUNT: usize = 5;

/// Feature vector of one candidate sequence, in model order.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn angle_change_variance(&self) -> f64 {
        self.0[0]
    }

    pub fn mean_baseline_angle(&self) -> f64 {
        self.0[1]
    }

    pub fn band_a_percent(&self) -> f64 {
        self.0[2]
    }

    pub fn band_b_percent(&self) -> f64 {
        self.0[3]
    }

    pub fn ink_density(&self) -> f64 {
        self.0[4]
    }
}

/// Extract features from an already preprocessed sequence.
///
/// `strokes` must be the output of [`preprocess`]. The ink canvas is sized
/// from the point extent, so raw capture coordinates would allocate a canvas
/// as large as the capture area. Use [`sequence_features`] for raw strokes.
pub fn extract_features(strokes: &[Stroke], config: &FeatureConfig) -> FeatureVector {
    let points = merged_valid_points(strokes);
    let baseline = baseline_angles(&points, config.band_a_deg, config.band_b_deg);
    FeatureVector([
        angle_change_variance(&points),
        baseline.mean_deg,
        baseline.band_a_percent,
        baseline.band_b_percent,
        ink_density(strokes, config),
    ])
}

/// Preprocess a raw candidate sequence and extract its features.
///
/// Recognition and any offline export both go through this function, so the
/// model always sees features computed the same way.
pub fn sequence_features(sequence: &[&Stroke], config: &RecognizeConfig) -> FeatureVector {
    let normalized = preprocess(sequence, &config.preprocess);
    extract_features(&normalized, &config.features)
}

/// Valid points of all strokes, concatenated in stroke order.
fn merged_valid_points(strokes: &[Stroke]) -> Vec<InkPoint> {
    strokes.iter().flat_map(Stroke::valid_points).collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::geometry::Sample;
    use crate::test_utils::{circle_stroke, cross_strokes, line_stroke, refs};

    fn inject_dropouts(stroke: &Stroke, rng: &mut StdRng) -> Stroke {
        let mut samples: Vec<Sample> = Vec::new();
        let src = stroke.samples();
        for (i, s) in src.iter().enumerate() {
            samples.push(*s);
            if i + 1 < src.len() && rng.gen_bool(0.3) {
                samples.push(None);
            }
        }
        Stroke::new(stroke.id, stroke.start_ms, stroke.stop_ms, stroke.bounds, samples)
    }

    #[test]
    fn features_ignore_isolated_dropouts() {
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = FeatureConfig::default();
        let clean = vec![circle_stroke(1, [50, 50], 40, 24), line_stroke(2, [10, 50], [90, 60], 12)];
        let noisy: Vec<Stroke> = clean.iter().map(|s| inject_dropouts(s, &mut rng)).collect();
        assert!(noisy.iter().any(|s| s.valid_count() < s.len()));
        assert_eq!(extract_features(&clean, &cfg), extract_features(&noisy, &cfg));
    }

    #[test]
    fn two_points_have_zero_angle_variance() {
        let s = line_stroke(1, [0, 0], [30, 40], 2);
        let f = extract_features(&[s], &FeatureConfig::default());
        assert_eq!(f.angle_change_variance(), 0.0);
    }

    #[test]
    fn cross_splits_between_both_bands() {
        let [a, b] = cross_strokes(1, [10, 10], 80, 17);
        let f = sequence_features(&refs(&[a, b]), &RecognizeConfig::default());
        assert!(f.band_a_percent() > 40.0, "{:?}", f);
        assert!(f.band_b_percent() > 40.0, "{:?}", f);
        assert!(f.ink_density() > 0.0);
    }

    #[test]
    fn slash_lands_in_band_a_only() {
        let s = line_stroke(1, [10, 90], [90, 10], 17);
        let f = sequence_features(&[&s], &RecognizeConfig::default());
        assert_eq!(f.band_a_percent(), 100.0);
        assert_eq!(f.band_b_percent(), 0.0);
    }

    #[test]
    fn raw_capture_coordinates_go_through_the_preprocessing_frame() {
        let small = line_stroke(1, [10, 90], [90, 10], 17);
        let large = line_stroke(1, [640, 5760], [5760, 640], 17);
        let cfg = RecognizeConfig::default();
        let f = sequence_features(&[&large], &cfg);
        assert_eq!(f, sequence_features(&[&small], &cfg));

        let framed = preprocess(&[&large], &cfg.preprocess);
        assert_eq!(extract_features(&framed, &cfg.features), f);
    }
}
