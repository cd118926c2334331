//! inkmark — pen-gesture recognition for marked form regions.
//!
//! Strokes drawn over a fixed layout are routed to the regions they land in.
//! For each region the pipeline recovers one result per intended mark:
//!
//! 1. **Region filter** – near-duplicate removal and centroid/size checks.
//! 2. **Rough sequencing** – runs of strokes with contiguous identifiers.
//! 3. **Preprocess** – rescale into a 100×100 frame, smooth, thin.
//! 4. **Features** – angle-change variance, baseline angles, ink density.
//! 5. **Classify** – scaled features → cross, crossed-out, circle, slash or
//!    back-slash with per-pattern probabilities.
//! 6. **Stitch** – split, merge or drop candidates using classifier answers
//!    and spatial containment.
//!
//! # Public API
//! - [`Recognizer`] as the primary entry point
//! - [`Region`] and [`RegionLayout`] to collect strokes
//! - [`RecognizeConfig`] for tuning
//! - [`PatternClassifier`] as the model boundary, with [`LinearModel`] and
//!   the lazily loaded [`LazyModel`]

mod api;
mod capture;
mod classifier;
mod config;
mod error;
mod features;
mod geometry;
mod layout;
mod pipeline;
mod preprocess;
mod region;
mod rough;
mod stitch;

pub use api::Recognizer;
pub use capture::{CaptureFile, StrokeRecord};
pub use classifier::{
    classify, Classification, LazyModel, LinearModel, Pattern, PatternClassifier, PatternScores,
    RawPrediction, ScaleRange, MODEL_SCHEMA_V1,
};
pub use config::{FeatureConfig, PreprocessConfig, RecognizeConfig, RegionFilterConfig, StitchConfig};
pub use error::RecognizeError;
pub use features::{extract_features, sequence_features, FeatureVector, FEATURE_COUNT};
pub use geometry::{gravity_center, Bounds, InkPoint, Sample, Stroke};
pub use layout::{NamedRegion, RegionLayout, LAYOUT_SCHEMA_V1};
pub use pipeline::SequencingResult;
pub use preprocess::preprocess;
pub use region::Region;
pub use rough::rough_sequences;
pub use stitch::{stitch_sequences, FeatureOracle, SequenceOracle};

#[cfg(test)]
pub(crate) mod test_utils;
