use crate::shared::emotion::Emotion;
use crate::shared::face_box::FaceBox;
use crate::shared::generation::Generation;

/// What the overlay should say about one face on one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FaceStatus {
    /// Observed but not yet locked; attributes still settling.
    Stabilizing,
    /// Attributes frozen for the lifetime of this face record.
    Locked {
        emotion: Emotion,
        age: u32,
        generation: Generation,
        look: &'static str,
    },
}

/// A face box plus the overlay status to render for it.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceAnnotation {
    pub face_box: FaceBox,
    pub status: FaceStatus,
}

impl FaceAnnotation {
    pub fn stabilizing(face_box: FaceBox) -> Self {
        Self {
            face_box,
            status: FaceStatus::Stabilizing,
        }
    }

    pub fn locked(
        face_box: FaceBox,
        emotion: Emotion,
        age: u32,
        generation: Generation,
        look: &'static str,
    ) -> Self {
        Self {
            face_box,
            status: FaceStatus::Locked {
                emotion,
                age,
                generation,
                look,
            },
        }
    }

    /// Overlay lines, ordered nearest-to-the-box first. Renderers stack
    /// them upward above the top edge.
    pub fn labels(&self) -> Vec<String> {
        match &self.status {
            FaceStatus::Stabilizing => vec!["Emotion: Stabilizing...".to_string()],
            FaceStatus::Locked {
                emotion,
                age,
                generation,
                look,
            } => vec![
                format!("Emotion: {emotion}"),
                format!("Age: {age}"),
                format!("Gen: {generation}"),
                format!("Look: {look}"),
            ],
        }
    }
}
