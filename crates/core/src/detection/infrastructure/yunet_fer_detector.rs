//! Face localization via OpenCV's YuNet plus emotion scoring via the
//! FER+ ONNX model.
//!
//! YuNet runs on the full BGR frame; each detected box is then cropped
//! from the RGB frame and shrunk to the emotion model's grayscale
//! input, with one ONNX Runtime call per face.

use std::path::Path;

use ndarray::Array4;
use opencv::core::{Mat, Ptr, Size};
use opencv::objdetect::FaceDetectorYN;
use opencv::prelude::*;

use crate::detection::domain::emotion_detector::{EmotionDetector, FaceReading};
use crate::shared::emotion::{Emotion, EmotionScores};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;
use crate::shared::mat_convert;

/// Default face-detection confidence threshold.
pub const DEFAULT_CONFIDENCE: f32 = 0.9;

/// YuNet non-max-suppression threshold.
const NMS_THRESHOLD: f32 = 0.3;

/// YuNet keeps at most this many candidates before NMS.
const TOP_K: i32 = 5000;

/// Side length of the emotion model's square grayscale input.
const EMOTION_INPUT_SIZE: usize = 64;

/// FER+ output order. The last slot (contempt) has no counterpart in
/// the seven-label set and is dropped from the scores.
const EMOTION_OUTPUT_ORDER: [Option<Emotion>; 8] = [
    Some(Emotion::Neutral),
    Some(Emotion::Happy),
    Some(Emotion::Surprise),
    Some(Emotion::Sad),
    Some(Emotion::Angry),
    Some(Emotion::Disgust),
    Some(Emotion::Fear),
    None,
];

/// Combined YuNet + FER+ [`EmotionDetector`].
pub struct YunetFerDetector {
    face_detector: Ptr<FaceDetectorYN>,
    emotion_session: ort::session::Session,
    input_size: Size,
}

impl YunetFerDetector {
    pub fn new(
        face_model: &Path,
        emotion_model: &Path,
        confidence: f32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let input_size = Size::new(320, 320);
        let face_detector = FaceDetectorYN::create(
            &face_model.to_string_lossy(),
            "",
            input_size,
            confidence,
            NMS_THRESHOLD,
            TOP_K,
            0,
            0,
        )?;
        let emotion_session =
            ort::session::Session::builder()?.commit_from_file(emotion_model)?;
        Ok(Self {
            face_detector,
            emotion_session,
            input_size,
        })
    }

    fn score_emotions(
        &mut self,
        frame: &Frame,
        face: &FaceBox,
    ) -> Result<EmotionScores, Box<dyn std::error::Error>> {
        let tensor = crop_to_gray_tensor(frame, face);
        let input = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.emotion_session.run(ort::inputs![input])?;
        if outputs.len() == 0 {
            return Err("emotion model produced no outputs".into());
        }
        let raw = outputs[0].try_extract_array::<f32>()?;
        let logits = raw.as_slice().ok_or("emotion output is not contiguous")?;
        Ok(scores_from_logits(logits))
    }
}

impl EmotionDetector for YunetFerDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceReading>, Box<dyn std::error::Error>> {
        let mat = mat_convert::rgb_frame_to_bgr_mat(frame)?;

        // YuNet wants the input size declared before detection.
        let frame_size = Size::new(frame.width() as i32, frame.height() as i32);
        if frame_size != self.input_size {
            self.face_detector.set_input_size(frame_size)?;
            self.input_size = frame_size;
        }

        let mut detections = Mat::default();
        self.face_detector.detect(&mat, &mut detections)?;

        // Each detection row is [x, y, w, h, 5 landmark pairs, score].
        let mut readings = Vec::with_capacity(detections.rows() as usize);
        for row in 0..detections.rows() {
            let face_box = FaceBox::new(
                detections.at_2d::<f32>(row, 0)?.round() as i32,
                detections.at_2d::<f32>(row, 1)?.round() as i32,
                detections.at_2d::<f32>(row, 2)?.round() as i32,
                detections.at_2d::<f32>(row, 3)?.round() as i32,
            );
            let scores = self.score_emotions(frame, &face_box)?;
            readings.push(FaceReading::new(face_box, scores));
        }
        Ok(readings)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Crops a face from the frame and shrinks it to the emotion model's
/// `1x1x64x64` grayscale tensor. Sampling is nearest neighbor with
/// luma weighting; values stay in the raw 0-255 range FER+ expects.
///
/// Degenerate boxes sample whatever single pixel they clamp to; a
/// zero-sized frame yields an all-black tensor.
fn crop_to_gray_tensor(frame: &Frame, face: &FaceBox) -> Array4<f32> {
    let mut tensor = Array4::<f32>::zeros((1, 1, EMOTION_INPUT_SIZE, EMOTION_INPUT_SIZE));
    if frame.width() == 0 || frame.height() == 0 {
        return tensor;
    }

    let clamped = face.clamp_to(frame.width(), frame.height());
    let src = frame.as_ndarray();
    let crop_w = clamped.width.max(1) as usize;
    let crop_h = clamped.height.max(1) as usize;
    let max_x = frame.width() as usize - 1;
    let max_y = frame.height() as usize - 1;

    for ty in 0..EMOTION_INPUT_SIZE {
        let sy = (clamped.y as usize + ty * crop_h / EMOTION_INPUT_SIZE).min(max_y);
        for tx in 0..EMOTION_INPUT_SIZE {
            let sx = (clamped.x as usize + tx * crop_w / EMOTION_INPUT_SIZE).min(max_x);
            let r = src[[sy, sx, 0]] as f32;
            let g = src[[sy, sx, 1]] as f32;
            let b = src[[sy, sx, 2]] as f32;
            tensor[[0, 0, ty, tx]] = 0.299 * r + 0.587 * g + 0.114 * b;
        }
    }
    tensor
}

// ---------------------------------------------------------------------------
// Postprocessing
// ---------------------------------------------------------------------------

/// Softmaxes the raw FER+ outputs and relabels them onto the
/// seven-emotion set.
fn scores_from_logits(logits: &[f32]) -> EmotionScores {
    let probs = softmax(logits);
    let mut scores = EmotionScores::new();
    for (i, label) in EMOTION_OUTPUT_ORDER.iter().enumerate() {
        if let (Some(emotion), Some(p)) = (label, probs.get(i)) {
            scores.insert(*emotion, *p);
        }
    }
    scores
}

fn softmax(xs: &[f32]) -> Vec<f32> {
    let max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = xs.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; xs.len()];
    }
    exps.iter().map(|e| e / sum).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
