//! Error type shared by the recognition pipeline.

use std::path::PathBuf;

/// Errors raised while filtering, classifying or stitching strokes.
///
/// Low-confidence tails and failed containment checks are not errors; they
/// only suppress or postpone a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizeError {
    /// The persisted classifier could not be loaded.
    ModelUnavailable {
        /// Path the loader attempted to read.
        path: PathBuf,
        /// Underlying failure, rendered as text so the error stays cloneable.
        reason: String,
    },
    /// A centroid or gravity center was requested for input without valid points.
    DegenerateStroke {
        /// Identifier of the offending stroke, when a single stroke is involved.
        stroke_id: Option<u8>,
    },
    /// The classifier predicted a label outside the five known patterns.
    UnknownPredictedLabel {
        /// Raw label returned by the classifier.
        label: i32,
    },
    /// Scale-range divisors are missing, non-finite or non-positive.
    InvalidScaleRange {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A model file parsed but does not describe a usable classifier.
    InvalidModel {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl std::fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelUnavailable { path, reason } => {
                write!(f, "model unavailable at {}: {}", path.display(), reason)
            }
            Self::DegenerateStroke {
                stroke_id: Some(id),
            } => write!(f, "stroke {} has no valid points", id),
            Self::DegenerateStroke { stroke_id: None } => {
                write!(f, "sequence has no valid points")
            }
            Self::UnknownPredictedLabel { label } => {
                write!(f, "classifier predicted unknown label {}", label)
            }
            Self::InvalidScaleRange { reason } => write!(f, "invalid scale range: {}", reason),
            Self::InvalidModel { reason } => write!(f, "invalid model: {}", reason),
        }
    }
}

impl std::error::Error for RecognizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_model_path() {
        let err = RecognizeError::ModelUnavailable {
            path: PathBuf::from("/models/gesture.json"),
            reason: "No such file or directory".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("/models/gesture.json"));
        assert!(text.contains("No such file"));
    }

    #[test]
    fn display_distinguishes_stroke_and_sequence() {
        let stroke = RecognizeError::DegenerateStroke { stroke_id: Some(7) };
        let seq = RecognizeError::DegenerateStroke { stroke_id: None };
        assert_eq!(stroke.to_string(), "stroke 7 has no valid points");
        assert_eq!(seq.to_string(), "sequence has no valid points");
    }
}
