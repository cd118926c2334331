//! Boundary to the statistical classifier.
//!
//! The classifier itself is opaque: it receives a scaled feature vector and
//! answers with a label in `1..=5` and one probability per pattern. This
//! module owns the label contract, the scaling step and the percentage
//! conversion.

mod model;
mod scale;

pub use model::{LazyModel, LinearModel, MODEL_SCHEMA_V1};
pub use scale::ScaleRange;

use crate::error::RecognizeError;
use crate::features::FeatureVector;

/// The five pictorial patterns, numbered as the classifier labels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Cross = 1,
    CrossedOut = 2,
    Circle = 3,
    Slash = 4,
    BackSlash = 5,
}

impl Pattern {
    /// All patterns in label order.
    pub const ALL: [Pattern; 5] = [
        Pattern::Cross,
        Pattern::CrossedOut,
        Pattern::Circle,
        Pattern::Slash,
        Pattern::BackSlash,
    ];

    /// Classifier label (1-based).
    pub fn label(self) -> i32 {
        self as i32
    }

    /// Zero-based position in probability arrays.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Map a classifier label back to a pattern.
    pub fn from_label(label: i32) -> Result<Self, RecognizeError> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == label)
            .ok_or(RecognizeError::UnknownPredictedLabel { label })
    }

    /// Single diagonal stroke patterns that may pair into a cross.
    pub fn is_diagonal(self) -> bool {
        matches!(self, Pattern::Slash | Pattern::BackSlash)
    }
}

/// One score per pattern, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PatternScores {
    pub cross: f64,
    pub crossed_out: f64,
    pub circle: f64,
    pub slash: f64,
    pub back_slash: f64,
}

impl PatternScores {
    /// Build from an array in label order.
    pub fn from_array(v: [f64; 5]) -> Self {
        Self {
            cross: v[0],
            crossed_out: v[1],
            circle: v[2],
            slash: v[3],
            back_slash: v[4],
        }
    }

    pub fn to_array(&self) -> [f64; 5] {
        [
            self.cross,
            self.crossed_out,
            self.circle,
            self.slash,
            self.back_slash,
        ]
    }

    pub fn get(&self, pattern: Pattern) -> f64 {
        self.to_array()[pattern.index()]
    }
}

/// Native classifier answer: raw label and probabilities in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPrediction {
    pub label: i32,
    pub probabilities: [f64; 5],
}

/// A trained gesture classifier.
///
/// Implementations must be safe to query from several threads once built.
pub trait PatternClassifier: Send + Sync {
    /// Predict from an already scaled feature vector.
    fn predict(&self, scaled_features: &[f64]) -> Result<RawPrediction, RecognizeError>;
}

/// Classification of one candidate sequence.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    pub pattern: Pattern,
    /// Probabilities as percentages rounded to two decimals.
    pub scores: PatternScores,
}

impl Classification {
    /// Score of the predicted pattern.
    pub fn confidence(&self) -> f64 {
        self.scores.get(self.pattern)
    }
}

fn to_percent(p: f64) -> f64 {
    (p * 100.0 * 100.0).round() / 100.0
}

/// Scale `features`, query `classifier` and convert its answer.
pub fn classify(
    classifier: &dyn PatternClassifier,
    scale: &ScaleRange,
    features: &FeatureVector,
) -> Result<Classification, RecognizeError> {
    let scaled = scale.apply(features.as_slice());
    let raw = classifier.predict(&scaled)?;
    let pattern = Pattern::from_label(raw.label)?;
    Ok(Classification {
        pattern,
        scores: PatternScores::from_array(raw.probabilities.map(to_percent)),
    })
}
