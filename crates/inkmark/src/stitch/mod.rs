//! Sequence stitching: turn rough sequences into gestures.
//!
//! Each rough sequence is either a single stroke or a run of strokes with
//! contiguous identifiers. Single diagonals are held back for one step in
//! case the next single stroke completes a cross. Longer runs are peeled
//! from the end, querying the classifier on each tail and on what remains
//! in front of it, until one of the pattern rules decides how to split or
//! merge them.
//!
//! Every candidate that reaches an emit-or-reject decision consumes a
//! sequence number, so rejected candidates leave gaps in the numbering.

mod peel;


use crate::classifier::{classify, Classification, PatternClassifier, ScaleRange};
use crate::config::RecognizeConfig;
use crate::error::RecognizeError;
use crate::features::sequence_features;
use crate::geometry::{Bounds, Stroke};
use crate::pipeline::SequencingResult;

use peel::{admitted_by, center_of, peel_step, Emission, Step};

/// Classifies candidate stroke sequences.
pub trait SequenceOracle {
    fn classify_sequence(&self, sequence: &[&Stroke]) -> Result<Classification, RecognizeError>;
}

/// Oracle backed by feature extraction and a trained classifier.
pub struct FeatureOracle<'a> {
    pub classifier: &'a dyn PatternClassifier,
    pub scale: &'a ScaleRange,
    pub config: &'a RecognizeConfig,
}

impl SequenceOracle for FeatureOracle<'_> {
    fn classify_sequence(&self, sequence: &[&Stroke]) -> Result<Classification, RecognizeError> {
        let features = sequence_features(sequence, self.config);
        classify(self.classifier, self.scale, &features)
    }
}

/// Single diagonal waiting for a partner.
#[derive(Debug)]
struct Pending<'s> {
    stroke: &'s Stroke,
    classification: Classification,
    number: u32,
}

/// Stitcher state across the rough sequences of one region.
struct Stitcher<'s, 'o> {
    oracle: &'o dyn SequenceOracle,
    min_tail_confidence: f64,
    count: u32,
    pending: Option<Pending<'s>>,
    prior_box: Option<Bounds>,
    results: Vec<SequencingResult>,
}

impl<'s, 'o> Stitcher<'s, 'o> {
    fn new(oracle: &'o dyn SequenceOracle, min_tail_confidence: f64) -> Self {
        Self {
            oracle,
            min_tail_confidence,
            count: 0,
            pending: None,
            prior_box: None,
            results: Vec::new(),
        }
    }

    fn next_number(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    fn push<'a, I>(&mut self, number: u32, strokes: I, classification: &Classification)
    where
        I: IntoIterator<Item = &'a Stroke>,
    {
        let result = SequencingResult::from_strokes(number, strokes, classification);
        tracing::debug!(
            sequence = number,
            pattern = ?classification.pattern,
            confidence = classification.confidence(),
            "emit"
        );
        self.results.push(result);
    }

    fn flush_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            self.push(p.number, [p.stroke], &p.classification);
        }
    }

    fn feed(&mut self, sequence: &'s [Stroke]) -> Result<(), RecognizeError> {
        match sequence {
            [] => Ok(()),
            [single] => self.feed_single(single),
            _ => {
                self.flush_pending();
                self.peel(sequence)
            }
        }
    }

    fn feed_single(&mut self, stroke: &'s Stroke) -> Result<(), RecognizeError> {
        let class = self.oracle.classify_sequence(&[stroke])?;

        if class.pattern.is_diagonal() {
            match self.pending.take() {
                Some(p) => {
                    // The pair takes over the number reserved by the first stroke.
                    let pair = [p.stroke, stroke];
                    let combined = self.oracle.classify_sequence(&pair)?;
                    self.count = p.number;
                    self.push(p.number, pair, &combined);
                }
                None => {
                    let number = self.next_number();
                    tracing::trace!(sequence = number, stroke = stroke.id, "holding diagonal");
                    self.pending = Some(Pending {
                        stroke,
                        classification: class,
                        number,
                    });
                }
            }
            return Ok(());
        }

        self.flush_pending();
        let number = self.next_number();
        if admitted_by(self.prior_box, center_of([stroke])?) {
            self.push(number, [stroke], &class);
        } else {
            tracing::debug!(sequence = number, stroke = stroke.id, "outside prior box");
        }
        Ok(())
    }

    fn peel(&mut self, sequence: &'s [Stroke]) -> Result<(), RecognizeError> {
        for k in (0..sequence.len()).rev() {
            let step = peel_step(
                self.oracle,
                sequence,
                k,
                self.min_tail_confidence,
                self.prior_box,
            )?;
            if let Step::Done {
                emissions,
                prior_box,
            } = step
            {
                for emission in emissions {
                    let number = self.next_number();
                    match emission {
                        Emission::Emit {
                            strokes,
                            classification,
                        } => self.push(number, strokes, &classification),
                        Emission::Suppress { strokes } => {
                            tracing::debug!(sequence = number, strokes = strokes.len(), "suppressed");
                        }
                    }
                }
                if prior_box.is_some() {
                    self.prior_box = prior_box;
                }
                break;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<SequencingResult> {
        self.flush_pending();
        self.results
    }
}

/// Stitch the rough sequences of one region into numbered results.
pub fn stitch_sequences(
    rough: &[&[Stroke]],
    oracle: &dyn SequenceOracle,
    min_tail_confidence: f64,
) -> Result<Vec<SequencingResult>, RecognizeError> {
    let mut stitcher = Stitcher::new(oracle, min_tail_confidence);
    for sequence in rough {
        stitcher.feed(sequence)?;
    }
    Ok(stitcher.finish())
}
