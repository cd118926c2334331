//! Ink geometry: timestamped points, axis-aligned bounds and strokes.

mod bounds;
mod point;
mod stroke;

pub use bounds::Bounds;
pub use point::{InkPoint, Sample};
pub use stroke::{dedup_samples, gravity_center, Stroke};
