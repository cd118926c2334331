//! Stroke capture files.
//!
//! The capture side reports a failed coordinate as `-1`. That convention is
//! translated into a missing sample here and nowhere else.

use std::path::Path;

use crate::geometry::{Bounds, InkPoint, Stroke};

/// One captured pen-down as stored on disk.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeRecord {
    pub id: u8,
    pub start_ms: i64,
    pub stop_ms: i64,
    /// `[left, top, right, bottom]` as reported by the capture source.
    pub bounds: [i32; 4],
    /// `(time_ms, x, y)` triples in capture order.
    pub points: Vec<(i64, i32, i32)>,
}

impl StrokeRecord {
    pub fn to_stroke(&self) -> Stroke {
        let [left, top, right, bottom] = self.bounds;
        let samples = self
            .points
            .iter()
            .map(|&(t, x, y)| InkPoint::from_capture(t, x, y))
            .collect();
        Stroke::new(
            self.id,
            self.start_ms,
            self.stop_ms,
            Bounds::new(left, top, right, bottom),
            samples,
        )
    }
}

/// A capture session: strokes in arrival order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CaptureFile {
    pub strokes: Vec<StrokeRecord>,
}

impl CaptureFile {
    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&data)?)
    }

    pub fn to_strokes(&self) -> Vec<Stroke> {
        self.strokes.iter().map(StrokeRecord::to_stroke).collect()
    }
}
