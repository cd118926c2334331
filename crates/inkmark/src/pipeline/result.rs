use crate::classifier::{Classification, Pattern, PatternScores};
use crate::geometry::Stroke;

/// One recovered gesture.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequencingResult {
    /// 1-based position in the region's output. Suppressed candidates leave
    /// gaps; the empty-region placeholder uses 0.
    pub sequence: u32,
    /// Earliest start time of the source strokes.
    pub start_ms: i64,
    /// Latest stop time of the source strokes.
    pub stop_ms: i64,
    /// Per-pattern scores in `0..=100`.
    pub likelihoods: PatternScores,
    /// Predicted pattern; absent for the empty-region placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

impl SequencingResult {
    /// All-zero result reported for an empty region on request.
    pub fn empty_placeholder() -> Self {
        Self {
            sequence: 0,
            start_ms: 0,
            stop_ms: 0,
            likelihoods: PatternScores::default(),
            pattern: None,
        }
    }

    /// Result for `strokes` numbered `sequence`.
    pub(crate) fn from_strokes<'a, I>(sequence: u32, strokes: I, classification: &Classification) -> Self
    where
        I: IntoIterator<Item = &'a Stroke>,
    {
        let (start_ms, stop_ms) = strokes
            .into_iter()
            .fold(None, |span: Option<(i64, i64)>, s| match span {
                Some((a, b)) => Some((a.min(s.start_ms), b.max(s.stop_ms))),
                None => Some((s.start_ms, s.stop_ms)),
            })
            .unwrap_or((0, 0));
        Self {
            sequence,
            start_ms,
            stop_ms,
            likelihoods: classification.scores,
            pattern: Some(classification.pattern),
        }
    }

    /// Score of the predicted pattern, 0 for the placeholder.
    pub fn confidence(&self) -> f64 {
        self.pattern.map_or(0.0, |p| self.likelihoods.get(p))
    }
}
