//! Single transitions of the stitcher, free of numbering state.

use crate::classifier::{Classification, Pattern};
use crate::error::RecognizeError;
use crate::geometry::{gravity_center, Bounds, Stroke};

use super::SequenceOracle;

/// What to do with one candidate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Emission<'s> {
    /// Report `strokes` as one gesture.
    Emit {
        strokes: Vec<&'s Stroke>,
        classification: Classification,
    },
    /// Reject `strokes` as noise. The candidate still consumes a number.
    Suppress { strokes: Vec<&'s Stroke> },
}

impl<'s> Emission<'s> {
    fn emit(strokes: &'s [Stroke], classification: Classification) -> Self {
        Self::Emit {
            strokes: strokes.iter().collect(),
            classification,
        }
    }

    fn suppress(strokes: &'s [Stroke]) -> Self {
        Self::Suppress {
            strokes: strokes.iter().collect(),
        }
    }
}

/// Outcome of examining one cursor position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step<'s> {
    /// Peel one more stroke.
    Continue,
    /// Stop peeling this rough sequence.
    Done {
        emissions: Vec<Emission<'s>>,
        /// Replacement for the remembered prior box, if any.
        prior_box: Option<Bounds>,
    },
}

/// Union of the capture bounding boxes of `strokes`.
pub(crate) fn bounding_box(strokes: &[Stroke]) -> Bounds {
    strokes
        .iter()
        .map(|s| s.bounds)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default()
}

pub(crate) fn center_of<'a, I>(strokes: I) -> Result<[f64; 2], RecognizeError>
where
    I: IntoIterator<Item = &'a Stroke>,
{
    gravity_center(strokes).ok_or(RecognizeError::DegenerateStroke { stroke_id: None })
}

/// `true` when no usable prior box exists or `center` lies inside it.
pub(crate) fn admitted_by(prior_box: Option<Bounds>, center: [f64; 2]) -> bool {
    match prior_box {
        Some(b) if b.has_positive_extent() => b.contains(center),
        _ => true,
    }
}

fn classify_slice(
    oracle: &dyn SequenceOracle,
    strokes: &[Stroke],
) -> Result<Classification, RecognizeError> {
    let refs: Vec<&Stroke> = strokes.iter().collect();
    oracle.classify_sequence(&refs)
}

/// Examine the split `sequence[..k]` (remaining) / `sequence[k..]` (tail).
///
/// The driver calls this with `k` running from `len - 1` down to 0. At
/// `k == 0` the tail is the whole sequence and every label terminates.
pub(crate) fn peel_step<'s>(
    oracle: &dyn SequenceOracle,
    sequence: &'s [Stroke],
    k: usize,
    min_tail_confidence: f64,
    prior_box: Option<Bounds>,
) -> Result<Step<'s>, RecognizeError> {
    let (remaining, tail) = sequence.split_at(k);
    let tail_class = classify_slice(oracle, tail)?;

    let label = if tail_class.confidence() < min_tail_confidence && !remaining.is_empty() {
        None
    } else {
        Some(tail_class.pattern)
    };
    tracing::trace!(
        k,
        tail_len = tail.len(),
        confidence = tail_class.confidence(),
        ?label,
        "peeled tail"
    );

    match label {
        None => Ok(Step::Continue),
        Some(Pattern::Circle | Pattern::CrossedOut) => {
            closed_shape(oracle, sequence, remaining, tail, tail_class)
        }
        Some(Pattern::Cross) => cross(oracle, sequence, remaining, tail, tail_class),
        Some(Pattern::Slash | Pattern::BackSlash) if remaining.is_empty() => {
            lone_diagonal(tail, tail_class, prior_box)
        }
        Some(Pattern::Slash | Pattern::BackSlash) => Ok(Step::Continue),
    }
}

/// Circle or crossed-out tail: merge with a matching remainder, otherwise
/// keep the tail only as an overlay inside the remainder.
fn closed_shape<'s>(
    oracle: &dyn SequenceOracle,
    sequence: &'s [Stroke],
    remaining: &'s [Stroke],
    tail: &'s [Stroke],
    tail_class: Classification,
) -> Result<Step<'s>, RecognizeError> {
    if remaining.is_empty() {
        return Ok(Step::Done {
            emissions: vec![Emission::emit(tail, tail_class)],
            prior_box: None,
        });
    }

    let rest_class = classify_slice(oracle, remaining)?;
    if rest_class.pattern == tail_class.pattern {
        tracing::debug!(pattern = ?rest_class.pattern, strokes = sequence.len(), "merged tail");
        return Ok(Step::Done {
            emissions: vec![Emission::emit(sequence, rest_class)],
            prior_box: None,
        });
    }

    let overlay = bounding_box(remaining).contains(center_of(tail)?);
    let tail_emission = if overlay {
        Emission::emit(tail, tail_class)
    } else {
        tracing::debug!(pattern = ?tail_class.pattern, "dropped tail outside remainder");
        Emission::suppress(tail)
    };
    Ok(Step::Done {
        emissions: vec![Emission::emit(remaining, rest_class), tail_emission],
        prior_box: None,
    })
}

/// Cross tail: absorb a cross-like remainder, otherwise split in two. The
/// tail's box becomes the prior box either way.
fn cross<'s>(
    oracle: &dyn SequenceOracle,
    sequence: &'s [Stroke],
    remaining: &'s [Stroke],
    tail: &'s [Stroke],
    tail_class: Classification,
) -> Result<Step<'s>, RecognizeError> {
    let prior_box = Some(bounding_box(tail));
    if remaining.is_empty() {
        return Ok(Step::Done {
            emissions: vec![Emission::emit(tail, tail_class)],
            prior_box,
        });
    }

    let rest_class = classify_slice(oracle, remaining)?;
    let emissions = if matches!(
        rest_class.pattern,
        Pattern::Cross | Pattern::Slash | Pattern::BackSlash
    ) {
        let combined = classify_slice(oracle, sequence)?;
        tracing::debug!(pattern = ?combined.pattern, strokes = sequence.len(), "merged cross");
        vec![Emission::emit(sequence, combined)]
    } else {
        vec![
            Emission::emit(remaining, rest_class),
            Emission::emit(tail, tail_class),
        ]
    };
    Ok(Step::Done {
        emissions,
        prior_box,
    })
}

/// Whole sequence reads as a single diagonal: keep it only inside the prior
/// box, then let it become the prior box.
fn lone_diagonal<'s>(
    tail: &'s [Stroke],
    tail_class: Classification,
    prior_box: Option<Bounds>,
) -> Result<Step<'s>, RecognizeError> {
    let emission = if admitted_by(prior_box, center_of(tail)?) {
        Emission::emit(tail, tail_class)
    } else {
        tracing::debug!(pattern = ?tail_class.pattern, "diagonal outside prior box");
        Emission::suppress(tail)
    };
    Ok(Step::Done {
        emissions: vec![emission],
        prior_box: Some(bounding_box(tail)),
    })
}
