use nalgebra::Vector2;

use crate::geometry::InkPoint;

/// Angle between two vectors in degrees, from the clamped dot-product
/// formula. `None` when either vector has zero length.
fn angle_deg(a: Vector2<f64>, b: Vector2<f64>) -> Option<f64> {
    let denom = a.norm() * b.norm();
    if denom <= 0.0 {
        return None;
    }
    let cos = (a.dot(&b) / denom).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Population variance of the absolute change between successive turning
/// angles along `points`.
///
/// The first turning angle contributes a change of 0. Returns 0 when fewer
/// than two turning angles exist.
pub fn angle_change_variance(points: &[InkPoint]) -> f64 {
    let angles: Vec<f64> = points
        .windows(3)
        .filter_map(|w| angle_deg(w[0] - w[1], w[2] - w[1]))
        .collect();
    if angles.len() < 2 {
        return 0.0;
    }

    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(angles.windows(2).map(|w| (w[1] - w[0]).abs()))
        .collect();
    let n = changes.len() as f64;
    let mean = changes.iter().sum::<f64>() / n;
    changes.iter().map(|c| (c - mean) * (c - mean)).sum::<f64>() / n
}

/// Orientation statistics of the segment directions of a point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaselineAngles {
    /// Mean angle against the horizontal, in degrees.
    pub mean_deg: f64,
    /// Percentage (0..100) of angles inside band A.
    pub band_a_percent: f64,
    /// Percentage (0..100) of angles inside band B.
    pub band_b_percent: f64,
}

/// Fold a direction vector so that opposite drawing directions of the same
/// line produce the same angle against the horizontal.
fn normalize_quadrant(v: Vector2<f64>) -> Vector2<f64> {
    let flip = (v.x < 0.0 && v.y > 0.0) || (v.x > 0.0 && v.y > 0.0);
    if flip {
        -v
    } else {
        v
    }
}

fn in_band(angle: f64, band: [f64; 2]) -> bool {
    angle >= band[0] && angle <= band[1]
}

/// Angle statistics of consecutive direction vectors against `(1, 0)`.
pub fn baseline_angles(points: &[InkPoint], band_a: [f64; 2], band_b: [f64; 2]) -> BaselineAngles {
    let reference = Vector2::new(1.0, 0.0);
    let angles: Vec<f64> = points
        .windows(2)
        .filter_map(|w| angle_deg(normalize_quadrant(w[1] - w[0]), reference))
        .collect();
    if angles.is_empty() {
        return BaselineAngles::default();
    }

    let n = angles.len() as f64;
    let count_in = |band: [f64; 2]| angles.iter().filter(|&&a| in_band(a, band)).count() as f64;
    BaselineAngles {
        mean_deg: angles.iter().sum::<f64>() / n,
        band_a_percent: 100.0 * count_in(band_a) / n,
        band_b_percent: 100.0 * count_in(band_b) / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BAND_A: [f64; 2] = [10.0, 80.0];
    const BAND_B: [f64; 2] = [100.0, 170.0];

    fn path(xy: &[(i32, i32)]) -> Vec<InkPoint> {
        xy.iter()
            .enumerate()
            .map(|(i, &(x, y))| InkPoint::new(i as i64, x, y))
            .collect()
    }

    #[test]
    fn straight_line_has_no_variance() {
        let p = path(&[(0, 0), (10, 0), (20, 0), (30, 0), (40, 0)]);
        assert_relative_eq!(angle_change_variance(&p), 0.0);
    }

    #[test]
    fn right_angle_turn_variance() {
        // Turning angles 180, 90, 180 -> changes 0, 90, 90.
        let p = path(&[(0, 0), (10, 0), (20, 0), (20, 10), (20, 20)]);
        assert_relative_eq!(angle_change_variance(&p), 1800.0, epsilon = 1e-9);
    }

    #[test]
    fn fewer_than_three_points_yield_zero() {
        assert_eq!(angle_change_variance(&path(&[(0, 0), (5, 5)])), 0.0);
        assert_eq!(angle_change_variance(&[]), 0.0);
    }

    #[test]
    fn drawing_direction_does_not_change_orientation() {
        let up = baseline_angles(&path(&[(0, 100), (50, 50), (100, 0)]), BAND_A, BAND_B);
        let down = baseline_angles(&path(&[(100, 0), (50, 50), (0, 100)]), BAND_A, BAND_B);
        assert_relative_eq!(up.mean_deg, 45.0, epsilon = 1e-9);
        assert_relative_eq!(down.mean_deg, 45.0, epsilon = 1e-9);
        assert_eq!(up.band_a_percent, 100.0);
        assert_eq!(down.band_b_percent, 0.0);
    }

    #[test]
    fn back_slash_lands_in_band_b() {
        let b = baseline_angles(&path(&[(0, 0), (50, 50), (100, 100)]), BAND_A, BAND_B);
        assert_relative_eq!(b.mean_deg, 135.0, epsilon = 1e-9);
        assert_eq!(b.band_b_percent, 100.0);
        assert_eq!(b.band_a_percent, 0.0);
    }

    #[test]
    fn horizontal_and_vertical_are_outside_both_bands() {
        let b = baseline_angles(&path(&[(0, 0), (10, 0), (0, 0), (0, 10)]), BAND_A, BAND_B);
        // 0, 180, 90 degrees.
        assert_relative_eq!(b.mean_deg, 90.0, epsilon = 1e-9);
        assert_eq!(b.band_a_percent, 0.0);
        assert_eq!(b.band_b_percent, 0.0);
    }

    #[test]
    fn repeated_points_are_skipped() {
        let b = baseline_angles(&path(&[(0, 0), (0, 0), (10, 0)]), BAND_A, BAND_B);
        assert_relative_eq!(b.mean_deg, 0.0);
    }
}
