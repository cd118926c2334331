//! High-level recognition API.
//!
//! [`Recognizer`] is the primary entry point. It bundles a
//! [`RecognizeConfig`], the [`ScaleRange`] the model was trained with and a
//! shared classifier handle. Create once, recognize many regions.

use std::path::Path;
use std::sync::Arc;

use crate::classifier::{Classification, LazyModel, PatternClassifier, ScaleRange};
use crate::config::RecognizeConfig;
use crate::error::RecognizeError;
use crate::features::{sequence_features, FeatureVector};
use crate::geometry::Stroke;
use crate::pipeline::{self, SequencingResult};
use crate::region::Region;
use crate::stitch::{FeatureOracle, SequenceOracle};

/// Primary recognition interface.
///
/// # Examples
///
/// ```no_run
/// use inkmark::{Recognizer, Region};
/// use std::path::Path;
///
/// let recognizer = Recognizer::from_model_file(Path::new("models/gestures.json"));
/// let region = Region::new(0, 0, 200, 100, 10);
/// let results = recognizer.recognize(&region, true).unwrap();
/// println!("{} gestures", results.len());
/// ```
#[derive(Clone)]
pub struct Recognizer {
    config: RecognizeConfig,
    scale: ScaleRange,
    classifier: Arc<dyn PatternClassifier>,
}

impl Recognizer {
    /// Recognizer with default configuration and scale range.
    pub fn new(classifier: Arc<dyn PatternClassifier>) -> Self {
        Self {
            config: RecognizeConfig::default(),
            scale: ScaleRange::default(),
            classifier,
        }
    }

    /// Recognizer backed by a model file that is loaded on first use.
    ///
    /// A missing or malformed file surfaces as
    /// [`RecognizeError::ModelUnavailable`] from the first recognition call
    /// and every call after it.
    pub fn from_model_file(path: &Path) -> Self {
        Self::new(Arc::new(LazyModel::new(path)))
    }

    pub fn with_config(mut self, config: RecognizeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_scale_range(mut self, scale: ScaleRange) -> Self {
        self.scale = scale;
        self
    }

    pub fn config(&self) -> &RecognizeConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RecognizeConfig {
        &mut self.config
    }

    pub fn scale_range(&self) -> &ScaleRange {
        &self.scale
    }

    /// New region using this recognizer's stroke filter settings.
    pub fn region(&self, left: i32, top: i32, right: i32, bottom: i32, extension: i32) -> Region {
        Region::new(left, top, right, bottom, extension).with_filter(self.config.region.clone())
    }

    fn oracle(&self) -> FeatureOracle<'_> {
        FeatureOracle {
            classifier: self.classifier.as_ref(),
            scale: &self.scale,
            config: &self.config,
        }
    }

    /// Recognize the gestures stored in `region`.
    pub fn recognize(
        &self,
        region: &Region,
        show_empty: bool,
    ) -> Result<Vec<SequencingResult>, RecognizeError> {
        pipeline::recognize_region(region, &self.oracle(), &self.config.stitch, show_empty)
    }

    /// Feature vector of a raw stroke sequence, computed exactly as during
    /// recognition.
    pub fn features(&self, sequence: &[&Stroke]) -> FeatureVector {
        sequence_features(sequence, &self.config)
    }

    /// Classify a raw stroke sequence as one candidate gesture.
    pub fn classify_sequence(&self, sequence: &[&Stroke]) -> Result<Classification, RecognizeError> {
        self.oracle().classify_sequence(sequence)
    }
}

impl std::fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizer")
            .field("config", &self.config)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}
