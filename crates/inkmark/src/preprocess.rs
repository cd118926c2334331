//! Sequence normalization: rescale into a fixed frame, smooth, thin out.
//!
//! Every stage returns new strokes; the captured strokes are never touched.
//! Failed samples pass through all stages unchanged.

use nalgebra::Vector2;

use crate::config::PreprocessConfig;
use crate::geometry::{dedup_samples, Bounds, Sample, Stroke};

/// Run rescale, smoothing and resampling on a candidate sequence.
pub fn preprocess(sequence: &[&Stroke], config: &PreprocessConfig) -> Vec<Stroke> {
    let rescaled = rescale(sequence, config.frame_size);
    let smoothed: Vec<Stroke> = rescaled
        .iter()
        .map(|s| smooth(s, config.smoothing_weights))
        .collect();
    resample(smoothed, config)
}

/// Map the sequence's union bounding box into a `frame x frame` square.
///
/// The longer box dimension spans the whole frame, the aspect ratio is kept
/// and the box center lands on the frame center.
pub fn rescale(sequence: &[&Stroke], frame: f64) -> Vec<Stroke> {
    let Some(bounds) = Bounds::from_points(sequence.iter().flat_map(|s| s.valid_points())) else {
        return sequence.iter().map(|s| (*s).clone()).collect();
    };

    let width = bounds.width() as f64;
    let height = bounds.height() as f64;
    let factor = if width <= 0.0 && height <= 0.0 {
        1.0
    } else {
        // A zero-length side divides to infinity and drops out of the min.
        (frame / width).min(frame / height)
    };
    let c = bounds.center();
    let center = Vector2::new(c[0], c[1]);
    let target = Vector2::new(0.5 * frame, 0.5 * frame);

    sequence
        .iter()
        .map(|stroke| {
            let samples = stroke
                .samples()
                .iter()
                .map(|s| s.map(|p| p.moved_to((p.xy() - center) * factor + target)))
                .collect();
            stroke.derive(samples)
        })
        .collect()
}

/// Three-tap weighted smoothing of interior samples.
///
/// A sample is left as is when it or either neighbour is a failed capture.
/// End samples are never smoothed.
pub fn smooth(stroke: &Stroke, weights: [f64; 3]) -> Stroke {
    let src = stroke.samples();
    let mut out: Vec<Sample> = src.to_vec();
    for i in 1..src.len().saturating_sub(1) {
        if let (Some(prev), Some(cur), Some(next)) = (src[i - 1], src[i], src[i + 1]) {
            let xy = prev.xy() * weights[0] + cur.xy() * weights[1] + next.xy() * weights[2];
            out[i] = Some(cur.moved_to(xy));
        }
    }
    stroke.derive(out)
}

/// Thin out near-duplicate points and enforce the density floor.
///
/// This is a floor, not a target: sequences that are still too dense after
/// the coarse pass are returned as they are.
pub fn resample(strokes: Vec<Stroke>, config: &PreprocessConfig) -> Vec<Stroke> {
    let fine = thin(&strokes, config.dedup_threshold);
    match point_density(&fine) {
        Some(density) if density < config.min_density => thin(&fine, config.coarse_dedup_threshold),
        _ => fine,
    }
}

fn thin(strokes: &[Stroke], threshold: f64) -> Vec<Stroke> {
    strokes
        .iter()
        .map(|s| s.derive(dedup_samples(s.samples(), threshold)))
        .collect()
}

/// Arc length per valid point, rounded up. `None` without valid points.
pub fn point_density(strokes: &[Stroke]) -> Option<f64> {
    let count: usize = strokes.iter().map(Stroke::valid_count).sum();
    if count == 0 {
        return None;
    }
    let length: f64 = strokes.iter().map(Stroke::length).sum();
    Some((length / count as f64).ceil())
}
