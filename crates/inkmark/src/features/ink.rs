//! Ink coverage of a sequence rendered onto a synthetic square canvas.

use image::{GrayImage, Luma};
use nalgebra::{Matrix2, Vector2};

use crate::config::FeatureConfig;
use crate::geometry::{gravity_center, InkPoint, Stroke};

const INK: Luma<u8> = Luma([255]);

/// Percentage (0..100) of canvas pixels covered when the sequence is drawn
/// with a pen proportional to the canvas size.
///
/// The canvas is centered on the gravity center; its side is twice the mean
/// point-to-center distance, shrunk by `config.canvas_shrink`. Returns 0 for
/// sequences without spatial extent.
///
/// Expects strokes normalized into the preprocessing frame; the canvas side
/// in pixels follows the coordinate extent.
pub fn ink_density(strokes: &[Stroke], config: &FeatureConfig) -> f64 {
    let Some(gc) = gravity_center(strokes) else {
        return 0.0;
    };
    let gc = Vector2::new(gc[0], gc[1]);

    let (sum, n) = strokes
        .iter()
        .flat_map(Stroke::valid_points)
        .fold((0.0, 0usize), |(sum, n), p| (sum + (p.xy() - gc).norm(), n + 1));
    let mean_dist = sum / n as f64;
    let side = 2.0 * mean_dist * (1.0 - config.canvas_shrink);
    if !side.is_finite() || side <= 0.0 {
        return 0.0;
    }

    let size_px = side.round().max(1.0) as u32;
    let px_per_unit = size_px as f64 / side;
    let origin = gc - Vector2::new(0.5 * side, 0.5 * side);
    let half_width_px = 0.5 * config.pen_width_ratio * side * px_per_unit;
    let to_canvas = |p: InkPoint| (p.xy() - origin) * px_per_unit;

    let mut canvas = GrayImage::new(size_px, size_px);
    for stroke in strokes {
        let points: Vec<InkPoint> = stroke.valid_points().collect();
        for w in points.windows(2) {
            let (a, b) = (to_canvas(w[0]), to_canvas(w[1]));
            if let Some((a, b)) = clip_segment(a, b, size_px as f64) {
                draw_thick_segment(&mut canvas, a, b, half_width_px);
            }
        }
    }

    let covered = canvas.pixels().filter(|p| p[0] > 0).count();
    100.0 * covered as f64 / (size_px as f64 * size_px as f64)
}

/// Parameter `t` along `p0 -> p1` where it crosses segment `q0 -> q1`.
fn segment_intersection(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    q0: Vector2<f64>,
    q1: Vector2<f64>,
) -> Option<f64> {
    let d = p1 - p0;
    let e = q1 - q0;
    let inv = Matrix2::new(d.x, -e.x, d.y, -e.y).try_inverse()?;
    let tu = inv * (q0 - p0);
    let unit = 0.0..=1.0;
    (unit.contains(&tu.x) && unit.contains(&tu.y)).then_some(tu.x)
}

/// Restrict segment `a -> b` to the square `[0, size]^2` by intersecting it
/// with the canvas edges. `None` when no part of it is inside.
fn clip_segment(a: Vector2<f64>, b: Vector2<f64>, size: f64) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let inside = |v: Vector2<f64>| v.x >= 0.0 && v.x <= size && v.y >= 0.0 && v.y <= size;
    let corners = [
        Vector2::new(0.0, 0.0),
        Vector2::new(size, 0.0),
        Vector2::new(size, size),
        Vector2::new(0.0, size),
    ];

    let mut ts: Vec<f64> = Vec::with_capacity(6);
    if inside(a) {
        ts.push(0.0);
    }
    if inside(b) {
        ts.push(1.0);
    }
    for k in 0..4 {
        if let Some(t) = segment_intersection(a, b, corners[k], corners[(k + 1) % 4]) {
            ts.push(t);
        }
    }

    let t_min = ts.iter().copied().reduce(f64::min)?;
    let t_max = ts.iter().copied().reduce(f64::max)?;
    let d = b - a;
    Some((a + d * t_min, a + d * t_max))
}

fn distance_to_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let d = b - a;
    let len2 = d.norm_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(&d) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + d * t)).norm()
}

/// Mark every pixel whose center lies within `half_width` of the segment.
fn draw_thick_segment(canvas: &mut GrayImage, a: Vector2<f64>, b: Vector2<f64>, half_width: f64) {
    let (w, h) = canvas.dimensions();
    let x0 = (a.x.min(b.x) - half_width).floor().max(0.0) as u32;
    let y0 = (a.y.min(b.y) - half_width).floor().max(0.0) as u32;
    let x1 = ((a.x.max(b.x) + half_width).ceil().max(0.0) as u32).min(w);
    let y1 = ((a.y.max(b.y) + half_width).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Vector2::new(x as f64 + 0.5, y as f64 + 0.5);
            if distance_to_segment(center, a, b) <= half_width {
                canvas.put_pixel(x, y, INK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{circle_stroke, line_stroke};
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    #[test]
    fn clip_keeps_inside_segment() {
        let (a, b) = clip_segment(v(1.0, 1.0), v(5.0, 5.0), 10.0).unwrap();
        assert_eq!((a, b), (v(1.0, 1.0), v(5.0, 5.0)));
    }

    #[test]
    fn clip_cuts_at_canvas_edges() {
        let (a, b) = clip_segment(v(-5.0, 5.0), v(15.0, 5.0), 10.0).unwrap();
        assert_relative_eq!(a.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(a.y, 5.0, epsilon = 1e-12);

        let (a, b) = clip_segment(v(5.0, 5.0), v(5.0, 25.0), 10.0).unwrap();
        assert_eq!(a, v(5.0, 5.0));
        assert_relative_eq!(b.y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn clip_rejects_outside_segment() {
        assert!(clip_segment(v(-5.0, -5.0), v(-1.0, 20.0), 10.0).is_none());
    }

    #[test]
    fn single_point_has_no_ink() {
        let s = line_stroke(1, [20, 20], [20, 20], 4);
        assert_eq!(ink_density(&[s], &FeatureConfig::default()), 0.0);
        assert_eq!(ink_density(&[], &FeatureConfig::default()), 0.0);
    }

    #[test]
    fn straight_line_covers_a_thin_band() {
        let s = line_stroke(1, [0, 50], [100, 50], 11);
        let ratio = ink_density(&[s], &FeatureConfig::default());
        assert!(ratio > 5.0 && ratio < 15.0, "ratio = {ratio}");
    }

    #[test]
    fn scribble_covers_more_than_a_line() {
        let line = line_stroke(1, [0, 50], [100, 50], 11);
        let mut scribble = Vec::new();
        for k in 0..6 {
            let y = 30 + 8 * k;
            scribble.push(line_stroke(k as u8, [20, y], [80, y + 4], 8));
        }
        let cfg = FeatureConfig::default();
        assert!(ink_density(&scribble, &cfg) > ink_density(&[line], &cfg));
    }

    #[test]
    fn circle_ratio_is_bounded() {
        let s = circle_stroke(1, [50, 50], 40, 48);
        let ratio = ink_density(&[s], &FeatureConfig::default());
        assert!(ratio > 0.0 && ratio <= 100.0);
    }
}
