use std::time::Duration;

pub const FACE_MODEL_NAME: &str = "face_detection_yunet_2023mar.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/opencv/opencv_zoo/raw/main/models/face_detection_yunet/face_detection_yunet_2023mar.onnx";

pub const EMOTION_MODEL_NAME: &str = "emotion-ferplus-8.onnx";
pub const EMOTION_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/emotion_ferplus/model/emotion-ferplus-8.onnx";

/// How long after session start faces keep reading "Stabilizing..."
/// before their attributes lock.
pub const STABILIZATION_DELAY: Duration = Duration::from_secs(4);
