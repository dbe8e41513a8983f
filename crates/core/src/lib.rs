//! Core library for MoodTune: watches faces through a webcam until
//! their emotion readings settle, then recommends one era-appropriate
//! song.
//!
//! Each bounded context keeps its domain ports separate from the
//! OpenCV/ONNX-backed adapters so the session loop stays testable
//! without cameras or models.

pub mod capture;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod recommendation;
pub mod shared;
pub mod tracking;
