//! Rough sequencing: split a region's strokes into runs of contiguous ids.

use crate::geometry::Stroke;

/// Partition `strokes` into maximal runs whose consecutive identifiers
/// differ by at most one.
///
/// Identifiers do not wrap: 255 followed by 0 starts a new run.
pub fn rough_sequences(strokes: &[Stroke]) -> Vec<&[Stroke]> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for i in 1..strokes.len() {
        let delta = (strokes[i].id as i16 - strokes[i - 1].id as i16).abs();
        if delta > 1 {
            out.push(&strokes[start..i]);
            start = i;
        }
    }
    if start < strokes.len() {
        out.push(&strokes[start..]);
    }
    out
}
