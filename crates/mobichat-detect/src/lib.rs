//! Wheelchair detection pipeline
//!
//! Loads an image, asks a detection-model endpoint for bounding boxes,
//! counts the wheelchairs it found and writes an annotated copy of the
//! image. The model itself stays a black box behind the HTTP contract.

pub mod annotate;
pub mod client;

pub use annotate::draw_detection;
pub use client::{DetectError, Detection, DetectorClient};
