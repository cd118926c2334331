//! Form regions and the stroke acceptance filter.

use crate::config::RegionFilterConfig;
use crate::error::RecognizeError;
use crate::geometry::{Bounds, Stroke};

/// A rectangle of the marked layout together with the strokes accepted into it.
#[derive(Debug, Clone)]
pub struct Region {
    pub rect: Bounds,
    /// Margin by which a stroke centroid may fall outside `rect`.
    pub extension: i32,
    pub filter: RegionFilterConfig,
    strokes: Vec<Stroke>,
}

impl Region {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32, extension: i32) -> Self {
        Self {
            rect: Bounds::new(left, top, right, bottom),
            extension,
            filter: RegionFilterConfig::default(),
            strokes: Vec::new(),
        }
    }

    /// Replace the acceptance rules.
    pub fn with_filter(mut self, filter: RegionFilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Accepted strokes in arrival order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Forget all accepted strokes.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// `true` when `xy` lies inside the rectangle grown by `extension`.
    pub fn contains_point(&self, xy: [f64; 2]) -> bool {
        self.rect.expanded(self.extension).contains(xy)
    }

    /// Offer a stroke to this region.
    ///
    /// Near-duplicate samples are removed from `stroke` in place before the
    /// centroid test, so the caller observes the filtered stroke whether or
    /// not it is accepted. An accepted copy has its outer dropouts trimmed.
    ///
    /// Returns [`RecognizeError::DegenerateStroke`] when the stroke has no
    /// valid point to compute a centroid from.
    pub fn add_stroke(&mut self, stroke: &mut Stroke, min_length: f64) -> Result<bool, RecognizeError> {
        stroke.filter_near_duplicates(self.filter.duplicate_threshold);
        let centroid = stroke
            .centroid()
            .ok_or(RecognizeError::DegenerateStroke {
                stroke_id: Some(stroke.id),
            })?;

        let accepted = self.contains_point(centroid)
            && stroke.valid_count() >= self.filter.min_valid_points
            && stroke.length() > min_length;
        if !accepted {
            tracing::trace!(
                "stroke {} rejected: centroid=({:.1}, {:.1}) valid={} length={:.1}",
                stroke.id,
                centroid[0],
                centroid[1],
                stroke.valid_count(),
                stroke.length()
            );
            return Ok(false);
        }

        let mut kept = stroke.clone();
        kept.trim_dropouts();
        self.strokes.push(kept);
        Ok(true)
    }
}
