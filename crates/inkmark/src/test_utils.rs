//! Synthetic stroke builders shared by unit tests.

use crate::geometry::{InkPoint, Stroke};

fn timestamp(id: u8, i: usize) -> i64 {
    id as i64 * 1000 + i as i64 * 10
}

/// Straight stroke with `n` evenly spaced points from `from` to `to`
/// (both included, rounded to the integer grid).
pub(crate) fn line_stroke(id: u8, from: [i32; 2], to: [i32; 2], n: usize) -> Stroke {
    let points = (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let x = from[0] as f64 + t * (to[0] - from[0]) as f64;
            let y = from[1] as f64 + t * (to[1] - from[1]) as f64;
            InkPoint::new(timestamp(id, i), x.round() as i32, y.round() as i32)
        })
        .collect();
    Stroke::from_points(id, points)
}

/// Closed-looking circular stroke with `n` points, starting at angle 0.
pub(crate) fn circle_stroke(id: u8, center: [i32; 2], radius: i32, n: usize) -> Stroke {
    let points = (0..n)
        .map(|i| {
            let a = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            let x = center[0] as f64 + radius as f64 * a.cos();
            let y = center[1] as f64 + radius as f64 * a.sin();
            InkPoint::new(timestamp(id, i), x.round() as i32, y.round() as i32)
        })
        .collect();
    Stroke::from_points(id, points)
}

/// Two diagonals of the square at `origin` with side `size`: a back-slash
/// with identifier `id`, then a slash with identifier `id + 1`.
pub(crate) fn cross_strokes(id: u8, origin: [i32; 2], size: i32, n: usize) -> [Stroke; 2] {
    let [x, y] = origin;
    [
        line_stroke(id, [x, y], [x + size, y + size], n),
        line_stroke(id + 1, [x + size, y], [x, y + size], n),
    ]
}

pub(crate) fn refs(strokes: &[Stroke]) -> Vec<&Stroke> {
    strokes.iter().collect()
}
