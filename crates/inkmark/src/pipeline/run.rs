//! Top-level pipeline orchestrator: rough sequencing → stitching.

use crate::config::StitchConfig;
use crate::error::RecognizeError;
use crate::region::Region;
use crate::rough::rough_sequences;
use crate::stitch::{stitch_sequences, SequenceOracle};

use super::SequencingResult;

/// Recognize every gesture stored in `region`.
///
/// An empty region yields no results, or a single all-zero placeholder
/// when `show_empty` is set.
pub fn recognize_region(
    region: &Region,
    oracle: &dyn SequenceOracle,
    config: &StitchConfig,
    show_empty: bool,
) -> Result<Vec<SequencingResult>, RecognizeError> {
    if region.is_empty() {
        tracing::debug!("empty region");
        return Ok(if show_empty {
            vec![SequencingResult::empty_placeholder()]
        } else {
            Vec::new()
        });
    }

    let rough = rough_sequences(region.strokes());
    tracing::debug!(
        strokes = region.strokes().len(),
        rough_sequences = rough.len(),
        "stitching region"
    );
    let results = stitch_sequences(&rough, oracle, config.min_tail_confidence)?;
    tracing::info!(
        strokes = region.strokes().len(),
        gestures = results.len(),
        "region recognized"
    );
    Ok(results)
}
