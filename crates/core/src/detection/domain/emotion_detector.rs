use crate::shared::emotion::EmotionScores;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// One face found in a frame, with its per-label emotion scores.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceReading {
    pub face_box: FaceBox,
    pub scores: EmotionScores,
}

impl FaceReading {
    pub fn new(face_box: FaceBox, scores: EmotionScores) -> Self {
        Self { face_box, scores }
    }
}

/// Domain interface for combined face localization and emotion scoring.
///
/// Implementations may be stateful (e.g., caching model input sizes),
/// hence `&mut self`. An empty result means no faces this frame.
pub trait EmotionDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceReading>, Box<dyn std::error::Error>>;
}
