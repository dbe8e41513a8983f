pub mod emotion_detector;
