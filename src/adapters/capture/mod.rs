//! Capture adapters: image sources and quality gates.

mod file_image_source;
mod quality_gate;

pub use file_image_source::FileImageSource;
pub use quality_gate::{FixedQualityGate, RandomQualityGate};
