#![allow(dead_code)]

use std::sync::Arc;

use inkmark::{
    InkPoint, PatternClassifier, RawPrediction, RecognizeError, Recognizer, Region, ScaleRange,
    Stroke,
};

/// Stand-in for a trained model that decides from the orientation bands
/// and the turning-angle variance only.
pub struct BandClassifier;

impl PatternClassifier for BandClassifier {
    fn predict(&self, f: &[f64]) -> Result<RawPrediction, RecognizeError> {
        let (variance, band_a, band_b) = (f[0], f[2], f[3]);
        let (label, p) = if band_a >= 80.0 {
            (4, 0.92)
        } else if band_b >= 80.0 {
            (5, 0.90)
        } else if band_a + band_b < 20.0 {
            (2, 0.90)
        } else if variance > 300.0 && band_a >= 30.0 && band_b >= 30.0 {
            (1, 0.95)
        } else {
            (3, 0.88)
        };
        let mut probabilities = [(1.0 - p) / 4.0; 5];
        probabilities[label as usize - 1] = p;
        Ok(RawPrediction {
            label,
            probabilities,
        })
    }
}

pub fn band_recognizer() -> Recognizer {
    let unit = ScaleRange::new(vec![1.0; 5]).expect("unit scale range");
    Recognizer::new(Arc::new(BandClassifier)).with_scale_range(unit)
}

fn timestamp(id: u8, i: usize) -> i64 {
    id as i64 * 1000 + i as i64 * 10
}

pub fn line(id: u8, from: [i32; 2], to: [i32; 2], n: usize) -> Stroke {
    let points = (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            let x = from[0] as f64 + t * (to[0] - from[0]) as f64;
            let y = from[1] as f64 + t * (to[1] - from[1]) as f64;
            InkPoint::new(timestamp(id, i), x.round() as i32, y.round() as i32)
        })
        .collect();
    Stroke::from_points(id, points)
}

pub fn circle(id: u8, center: [i32; 2], radius: i32, n: usize) -> Stroke {
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

/// Region `0..100` with a margin of 10, filled with `strokes`.
pub fn region_with(strokes: Vec<Stroke>) -> Region {
    let mut region = Region::new(0, 0, 100, 100, 10);
    for mut s in strokes {
        assert!(
            region.add_stroke(&mut s, 10.0).expect("valid stroke"),
            "stroke {} rejected",
            s.id
        );
    }
    region
}
