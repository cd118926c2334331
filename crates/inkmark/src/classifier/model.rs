//! Persisted linear classifier and its lazily loaded shared handle.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use nalgebra::{DMatrix, DVector};

use super::{PatternClassifier, RawPrediction};
use crate::error::RecognizeError;

/// Schema tag expected in model files.
pub const MODEL_SCHEMA_V1: &str = "inkmark.model.v1";

const N_CLASSES: usize = 5;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LinearModelSpecV1 {
    schema: String,
    /// One row of feature weights per class, in label order.
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// Multinomial logistic regression over the scaled feature vector.
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: DMatrix<f64>,
    bias: DVector<f64>,
}

impl LinearModel {
    /// Build from per-class weight rows and biases.
    pub fn new(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> Result<Self, RecognizeError> {
        let invalid = |reason: String| RecognizeError::InvalidModel { reason };
        if weights.len() != N_CLASSES || bias.len() != N_CLASSES {
            return Err(invalid(format!(
                "expected {} classes, got {} weight rows and {} biases",
                N_CLASSES,
                weights.len(),
                bias.len()
            )));
        }
        let width = weights[0].len();
        if width == 0 || weights.iter().any(|row| row.len() != width) {
            return Err(invalid("weight rows must be non-empty and equally long".to_string()));
        }
        if weights.iter().flatten().chain(&bias).any(|v| !v.is_finite()) {
            return Err(invalid("non-finite coefficient".to_string()));
        }

        Ok(Self {
            weights: DMatrix::from_fn(N_CLASSES, width, |r, c| weights[r][c]),
            bias: DVector::from_vec(bias),
        })
    }

    /// Number of features the model expects.
    pub fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    /// Load a model from its JSON representation.
    pub fn from_json_str(data: &str) -> Result<Self, RecognizeError> {
        let spec: LinearModelSpecV1 =
            serde_json::from_str(data).map_err(|e| RecognizeError::InvalidModel {
                reason: e.to_string(),
            })?;
        if spec.schema != MODEL_SCHEMA_V1 {
            return Err(RecognizeError::InvalidModel {
                reason: format!(
                    "unsupported model schema '{}' (expected '{}')",
                    spec.schema, MODEL_SCHEMA_V1
                ),
            });
        }
        Self::new(spec.weights, spec.bias)
    }

    /// Load a model file. Any failure is reported as
    /// [`RecognizeError::ModelUnavailable`] carrying `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, RecognizeError> {
        let unavailable = |reason: String| RecognizeError::ModelUnavailable {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        Self::from_json_str(&data).map_err(|e| unavailable(e.to_string()))
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let spec = LinearModelSpecV1 {
            schema: MODEL_SCHEMA_V1.to_string(),
            weights: self
                .weights
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
            bias: self.bias.iter().copied().collect(),
        };
        serde_json::to_string_pretty(&spec)
    }
}

impl PatternClassifier for LinearModel {
    fn predict(&self, scaled_features: &[f64]) -> Result<RawPrediction, RecognizeError> {
        if scaled_features.len() != self.n_features() {
            return Err(RecognizeError::InvalidModel {
                reason: format!(
                    "model expects {} features, got {}",
                    self.n_features(),
                    scaled_features.len()
                ),
            });
        }
        let x = DVector::from_column_slice(scaled_features);
        let logits = &self.weights * x + &self.bias;

        let max = logits.max();
        let exp = logits.map(|v| (v - max).exp());
        let total = exp.sum();
        let mut probabilities = [0.0; N_CLASSES];
        for (p, e) in probabilities.iter_mut().zip(exp.iter()) {
            *p = e / total;
        }

        Ok(RawPrediction {
            label: logits.imax() as i32 + 1,
            probabilities,
        })
    }
}

/// Classifier loaded from disk on first use and shared afterwards.
///
/// Concurrent first callers block until one of them has finished loading.
/// A load failure is cached: every caller, current and later, receives the
/// same [`RecognizeError::ModelUnavailable`].
#[derive(Debug)]
pub struct LazyModel {
    path: PathBuf,
    cell: OnceLock<Result<LinearModel, RecognizeError>>,
}

impl LazyModel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` once a load attempt has completed, successful or not.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The loaded model, loading it on the first call.
    pub fn get(&self) -> Result<&LinearModel, RecognizeError> {
        let loaded = self.cell.get_or_init(|| {
            let result = LinearModel::from_json_file(&self.path);
            match &result {
                Ok(model) => tracing::info!(
                    "loaded gesture model {} ({} features)",
                    self.path.display(),
                    model.n_features()
                ),
                Err(e) => tracing::error!("{}", e),
            }
            result
        });
        loaded.as_ref().map_err(Clone::clone)
    }
}

impl PatternClassifier for LazyModel {
    fn predict(&self, scaled_features: &[f64]) -> Result<RawPrediction, RecognizeError> {
        self.get()?.predict(scaled_features)
    }
}
