use serde::{Deserialize, Serialize};

use super::{Bounds, InkPoint, Sample};

/// One pen-down to pen-up trace as delivered by the capture source.
///
/// `bounds`, `start_ms` and `stop_ms` come from the capture layer and are not
/// recomputed when samples are filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Identifier assigned by the capture source; consecutive pen-downs get
    /// consecutive identifiers.
    pub id: u8,
    pub start_ms: i64,
    pub stop_ms: i64,
    pub bounds: Bounds,
    samples: Vec<Sample>,
}

impl Stroke {
    pub fn new(id: u8, start_ms: i64, stop_ms: i64, bounds: Bounds, samples: Vec<Sample>) -> Self {
        Self {
            id,
            start_ms,
            stop_ms,
            bounds,
            samples,
        }
    }

    /// Build a stroke from samples alone, deriving timing and bounds from
    /// the valid points. Used for strokes that did not come from a capture
    /// source, such as preprocessed copies.
    pub fn from_samples(id: u8, samples: Vec<Sample>) -> Self {
        let valid = || samples.iter().flatten().copied();
        let bounds = Bounds::from_points(valid()).unwrap_or_default();
        let start_ms = valid().map(|p| p.time_ms).min().unwrap_or(0);
        let stop_ms = valid().map(|p| p.time_ms).max().unwrap_or(0);
        Self::new(id, start_ms, stop_ms, bounds, samples)
    }

    /// Same as [`Stroke::from_samples`] for a stroke without dropouts.
    pub fn from_points(id: u8, points: Vec<InkPoint>) -> Self {
        Self::from_samples(id, points.into_iter().map(Some).collect())
    }

    /// Derived stroke with new samples; identity and timing are kept, bounds
    /// are recomputed for the new coordinate frame.
    pub fn derive(&self, samples: Vec<Sample>) -> Self {
        let bounds = Bounds::from_points(samples.iter().flatten().copied()).unwrap_or_default();
        Self::new(self.id, self.start_ms, self.stop_ms, bounds, samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Valid points in capture order.
    pub fn valid_points(&self) -> impl Iterator<Item = InkPoint> + '_ {
        self.samples.iter().flatten().copied()
    }

    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_some()).count()
    }

    /// Sum of distances between adjacent valid samples. Spans touching a
    /// failed sample do not contribute.
    pub fn length(&self) -> f64 {
        self.samples
            .windows(2)
            .filter_map(|w| match (w[0], w[1]) {
                (Some(a), Some(b)) => Some(a.distance(b)),
                _ => None,
            })
            .sum()
    }

    /// Mean of the valid points, or `None` when there are none.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        gravity_center(std::iter::once(self))
    }

    /// Remove samples closer than `threshold` to the previously kept sample.
    pub fn filter_near_duplicates(&mut self, threshold: f64) {
        self.samples = dedup_samples(&self.samples, threshold);
    }

    /// Drop failed samples at both ends of the stroke.
    pub fn trim_dropouts(&mut self) {
        let Some(first) = self.samples.iter().position(Option::is_some) else {
            self.samples.clear();
            return;
        };
        let last = self
            .samples
            .iter()
            .rposition(Option::is_some)
            .unwrap_or(first);
        self.samples.truncate(last + 1);
        self.samples.drain(..first);
    }
}

/// Single forward pass that keeps a sample unless both it and the last kept
/// sample are valid and closer than `threshold`.
pub fn dedup_samples(samples: &[Sample], threshold: f64) -> Vec<Sample> {
    let mut kept: Vec<Sample> = Vec::with_capacity(samples.len());
    for &sample in samples {
        if let (Some(Some(prev)), Some(cur)) = (kept.last(), sample) {
            if prev.distance(cur) < threshold {
                continue;
            }
        }
        kept.push(sample);
    }
    kept
}

/// Mean position of all valid points across `strokes`.
pub fn gravity_center<'a, I>(strokes: I) -> Option<[f64; 2]>
where
    I: IntoIterator<Item = &'a Stroke>,
{
    let mut sum = [0.0f64; 2];
    let mut n = 0usize;
    for stroke in strokes {
        for p in stroke.valid_points() {
            sum[0] += p.x as f64;
            sum[1] += p.y as f64;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    Some([sum[0] / n as f64, sum[1] / n as f64])
}
