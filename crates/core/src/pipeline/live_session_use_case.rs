use std::time::Instant;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::emotion_detector::EmotionDetector;
use crate::display::domain::frame_display::{DisplayCommand, FrameDisplay};
use crate::pipeline::session_logger::SessionLogger;
use crate::tracking::domain::stabilization_tracker::StabilizationTracker;

/// What a finished session amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub faces_seen: usize,
    pub faces_locked: usize,
    pub recommendation_issued: bool,
}

/// The synchronous capture → detect → track → display loop.
///
/// Runs until the source ends or the display reports a quit keypress.
/// The source is released on every exit path, including errors.
pub struct LiveSessionUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn EmotionDetector>,
    tracker: StabilizationTracker,
    display: Box<dyn FrameDisplay>,
    logger: Box<dyn SessionLogger>,
}

impl LiveSessionUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn EmotionDetector>,
        tracker: StabilizationTracker,
        display: Box<dyn FrameDisplay>,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            tracker,
            display,
            logger,
        }
    }

    pub fn execute(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let result = self.run_loop();
        self.source.close();
        self.logger.summary();
        result
    }

    fn run_loop(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let info = self.source.open()?;
        self.logger.info(&format!(
            "stream open: {}x{} at {:.0} fps",
            info.width, info.height, info.fps
        ));

        let mut frames = 0usize;
        loop {
            let Some(frame) = self.source.next_frame()? else {
                self.logger.info("stream ended");
                break;
            };

            let detect_started = Instant::now();
            let readings = self.detector.detect(&frame)?;
            self.logger
                .timing("detect", detect_started.elapsed().as_secs_f64() * 1000.0);
            self.logger.metric("faces", readings.len() as f64);

            let annotations = self.tracker.observe(&readings, Instant::now());

            let show_started = Instant::now();
            let command = self.display.show(&frame, &annotations)?;
            self.logger
                .timing("display", show_started.elapsed().as_secs_f64() * 1000.0);

            frames += 1;
            self.logger.progress(frames);

            if command == DisplayCommand::Quit {
                self.logger.info("quit requested");
                break;
            }
        }

        Ok(SessionSummary {
            frames,
            faces_seen: self.tracker.face_count(),
            faces_locked: self.tracker.locked_count(),
            recommendation_issued: self.tracker.recommendation_issued(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::domain::frame_source::StreamInfo;
    use crate::detection::domain::emotion_detector::FaceReading;
    use crate::pipeline::session_logger::NullSessionLogger;
    use crate::recommendation::domain::link_opener::LinkOpener;
    use crate::recommendation::domain::song_catalog::SongCatalog;
    use crate::recommendation::domain::song_recommender::SongRecommender;
    use crate::shared::annotation::FaceAnnotation;
    use crate::shared::emotion::{Emotion, EmotionScores};
    use crate::shared::face_box::FaceBox;
    use crate::shared::frame::Frame;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // --- Stubs ---

    struct StubSource {
        frames: Vec<Frame>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubSource {
        fn new(count: usize) -> (Self, Arc<Mutex<bool>>) {
            let closed = Arc::new(Mutex::new(false));
            let frames = (0..count).map(|i| Frame::filled(128, 8, 8, i)).collect();
            (
                Self {
                    frames,
                    closed: closed.clone(),
                },
                closed,
            )
        }
    }

    impl FrameSource for StubSource {
        fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>> {
            Ok(StreamInfo {
                width: 8,
                height: 8,
                fps: 30.0,
            })
        }

        fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            if self.frames.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.frames.remove(0)))
            }
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct UnopenableSource {
        closed: Arc<Mutex<bool>>,
    }

    impl FrameSource for UnopenableSource {
        fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>> {
            Err("camera unavailable".into())
        }

        fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
            Ok(None)
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct StubDetector {
        results: HashMap<usize, Vec<FaceReading>>,
    }

    impl EmotionDetector for StubDetector {
        fn detect(
            &mut self,
            frame: &Frame,
        ) -> Result<Vec<FaceReading>, Box<dyn std::error::Error>> {
            Ok(self
                .results
                .get(&frame.index())
                .cloned()
                .unwrap_or_default())
        }
    }

    struct FailingDetector;

    impl EmotionDetector for FailingDetector {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<FaceReading>, Box<dyn std::error::Error>> {
            Err("model exploded".into())
        }
    }

    struct StubDisplay {
        face_counts: Arc<Mutex<Vec<usize>>>,
        quit_after: Option<usize>,
        calls: usize,
    }

    impl StubDisplay {
        fn new(quit_after: Option<usize>) -> (Self, Arc<Mutex<Vec<usize>>>) {
            let face_counts = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    face_counts: face_counts.clone(),
                    quit_after,
                    calls: 0,
                },
                face_counts,
            )
        }
    }

    impl FrameDisplay for StubDisplay {
        fn show(
            &mut self,
            _frame: &Frame,
            annotations: &[FaceAnnotation],
        ) -> Result<DisplayCommand, Box<dyn std::error::Error>> {
            self.calls += 1;
            self.face_counts.lock().unwrap().push(annotations.len());
            match self.quit_after {
                Some(n) if self.calls >= n => Ok(DisplayCommand::Quit),
                _ => Ok(DisplayCommand::Continue),
            }
        }
    }

    struct RecordingOpener {
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&mut self, url: &str) -> Result<(), Box<dyn std::error::Error>> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    // --- Helpers ---

    fn tracker_with_delay(delay: Duration) -> (StabilizationTracker, Arc<Mutex<Vec<String>>>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let opener = RecordingOpener {
            opened: opened.clone(),
        };
        let recommender = SongRecommender::new(SongCatalog::new(), Box::new(opener));
        let tracker = StabilizationTracker::with_settings(
            recommender,
            Instant::now(),
            delay,
            StdRng::seed_from_u64(42),
        );
        (tracker, opened)
    }

    fn reading(x: i32) -> FaceReading {
        FaceReading::new(
            FaceBox::new(x, 0, 4, 4),
            EmotionScores::from_pairs(&[(Emotion::Happy, 0.9)]),
        )
    }

    fn use_case(
        source: Box<dyn FrameSource>,
        detector: Box<dyn EmotionDetector>,
        tracker: StabilizationTracker,
        display: Box<dyn FrameDisplay>,
    ) -> LiveSessionUseCase {
        LiveSessionUseCase::new(
            source,
            detector,
            tracker,
            display,
            Box::new(NullSessionLogger),
        )
    }

    // --- Tests ---

    #[test]
    fn test_runs_until_source_is_exhausted() {
        let (source, closed) = StubSource::new(3);
        let (display, face_counts) = StubDisplay::new(None);
        let (tracker, _) = tracker_with_delay(Duration::from_secs(4));

        let mut uc = use_case(
            Box::new(source),
            Box::new(StubDetector {
                results: HashMap::new(),
            }),
            tracker,
            Box::new(display),
        );
        let summary = uc.execute().unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(face_counts.lock().unwrap().len(), 3);
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_quit_key_stops_the_loop() {
        let (source, closed) = StubSource::new(10);
        let (display, _) = StubDisplay::new(Some(2));
        let (tracker, _) = tracker_with_delay(Duration::from_secs(4));

        let mut uc = use_case(
            Box::new(source),
            Box::new(StubDetector {
                results: HashMap::new(),
            }),
            tracker,
            Box::new(display),
        );
        let summary = uc.execute().unwrap();

        assert_eq!(summary.frames, 2);
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_detector_error_propagates_but_source_closes() {
        let (source, closed) = StubSource::new(3);
        let (display, _) = StubDisplay::new(None);
        let (tracker, _) = tracker_with_delay(Duration::from_secs(4));

        let mut uc = use_case(
            Box::new(source),
            Box::new(FailingDetector),
            tracker,
            Box::new(display),
        );

        assert!(uc.execute().is_err());
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_open_failure_propagates() {
        let closed = Arc::new(Mutex::new(false));
        let (display, _) = StubDisplay::new(None);
        let (tracker, _) = tracker_with_delay(Duration::from_secs(4));

        let mut uc = use_case(
            Box::new(UnopenableSource {
                closed: closed.clone(),
            }),
            Box::new(StubDetector {
                results: HashMap::new(),
            }),
            tracker,
            Box::new(display),
        );

        assert!(uc.execute().is_err());
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_annotations_reach_the_display() {
        let (source, _closed) = StubSource::new(2);
        let (display, face_counts) = StubDisplay::new(None);
        let (tracker, _) = tracker_with_delay(Duration::from_secs(4));

        let mut results = HashMap::new();
        results.insert(0, vec![reading(0), reading(10)]);

        let mut uc = use_case(
            Box::new(source),
            Box::new(StubDetector { results }),
            tracker,
            Box::new(display),
        );
        uc.execute().unwrap();

        assert_eq!(*face_counts.lock().unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_faces_lock_and_recommendation_fires_through_the_loop() {
        let (source, _closed) = StubSource::new(2);
        let (display, _) = StubDisplay::new(None);
        // Zero delay: the gate is already open on the first frame.
        let (tracker, opened) = tracker_with_delay(Duration::ZERO);

        let mut results = HashMap::new();
        results.insert(0, vec![reading(0)]);
        results.insert(1, vec![reading(0)]);

        let mut uc = use_case(
            Box::new(source),
            Box::new(StubDetector { results }),
            tracker,
            Box::new(display),
        );
        let summary = uc.execute().unwrap();

        assert_eq!(summary.faces_seen, 1);
        assert_eq!(summary.faces_locked, 1);
        assert!(summary.recommendation_issued);
        assert_eq!(opened.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_source_summarizes_cleanly() {
        let (source, closed) = StubSource::new(0);
        let (display, face_counts) = StubDisplay::new(None);
        let (tracker, _) = tracker_with_delay(Duration::from_secs(4));

        let mut uc = use_case(
            Box::new(source),
            Box::new(StubDetector {
                results: HashMap::new(),
            }),
            tracker,
            Box::new(display),
        );
        let summary = uc.execute().unwrap();

        assert_eq!(summary.frames, 0);
        assert_eq!(summary.faces_seen, 0);
        assert!(!summary.recommendation_issued);
        assert!(face_counts.lock().unwrap().is_empty());
        assert!(*closed.lock().unwrap());
    }
}
