use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Coordinate value the capture layer writes for a dropped sample.
const CAPTURE_DROPOUT: i32 = -1;

/// A captured pen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InkPoint {
    /// Capture time in milliseconds.
    pub time_ms: i64,
    pub x: i32,
    pub y: i32,
}

/// One entry of a stroke: a valid point, or `None` for a failed capture.
pub type Sample = Option<InkPoint>;

impl InkPoint {
    pub fn new(time_ms: i64, x: i32, y: i32) -> Self {
        Self { time_ms, x, y }
    }

    /// Convert a raw capture triple, mapping the `-1` dropout marker on
    /// either axis to `None`.
    pub fn from_capture(time_ms: i64, x: i32, y: i32) -> Sample {
        if x == CAPTURE_DROPOUT || y == CAPTURE_DROPOUT {
            None
        } else {
            Some(Self { time_ms, x, y })
        }
    }

    /// Position as a floating-point vector.
    pub fn xy(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }

    /// Copy of this point moved to the given position (rounded).
    pub fn moved_to(self, xy: Vector2<f64>) -> Self {
        Self {
            time_ms: self.time_ms,
            x: xy.x.round() as i32,
            y: xy.y.round() as i32,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: InkPoint) -> f64 {
        (self - other).norm()
    }
}

impl std::ops::Sub for InkPoint {
    type Output = Vector2<f64>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.xy() - rhs.xy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dropout_on_either_axis_is_failed() {
        assert!(InkPoint::from_capture(0, -1, 10).is_none());
        assert!(InkPoint::from_capture(0, 10, -1).is_none());
        assert!(InkPoint::from_capture(0, -1, -1).is_none());
        assert_eq!(
            InkPoint::from_capture(5, 0, 0),
            Some(InkPoint::new(5, 0, 0))
        );
        // Other negative values are ordinary coordinates.
        assert!(InkPoint::from_capture(0, -2, 3).is_some());
    }

    #[test]
    fn subtraction_and_distance() {
        let a = InkPoint::new(0, 3, 4);
        let b = InkPoint::new(1, 0, 0);
        let d = a - b;
        assert_relative_eq!(d.x, 3.0);
        assert_relative_eq!(d.y, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn move_rounds_and_keeps_time() {
        let p = InkPoint::new(42, 3, 5).moved_to(Vector2::new(4.5, 7.49));
        assert_eq!(p, InkPoint::new(42, 5, 7));
    }
}
