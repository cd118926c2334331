//! Region recognition pipeline.
//!
//! Glue between the stages: stored strokes -> rough sequences -> stitching.
//! Per-sequence preprocessing and feature extraction run inside the
//! stitcher's oracle, once for every sub-sequence it explores.

mod result;
mod run;

pub use result::SequencingResult;
pub use run::recognize_region;
