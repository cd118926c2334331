use serde::{Deserialize, Serialize};

use super::InkPoint;

/// Axis-aligned rectangle in capture coordinates (inclusive edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Tight bounds of a point set, or `None` when it is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = InkPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut out = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            out.left = out.left.min(p.x);
            out.top = out.top.min(p.y);
            out.right = out.right.max(p.x);
            out.bottom = out.bottom.max(p.y);
        }
        Some(out)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// `true` when both width and height are strictly positive.
    pub fn has_positive_extent(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grow every edge outwards by `margin`.
    pub fn expanded(&self, margin: i32) -> Bounds {
        Bounds {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Inclusive containment test for a floating-point position.
    pub fn contains(&self, xy: [f64; 2]) -> bool {
        xy[0] >= self.left as f64
            && xy[0] <= self.right as f64
            && xy[1] >= self.top as f64
            && xy[1] <= self.bottom as f64
    }

    /// Center of the rectangle.
    pub fn center(&self) -> [f64; 2] {
        [
            0.5 * (self.left as f64 + self.right as f64),
            0.5 * (self.top as f64 + self.bottom as f64),
        ]
    }
}
