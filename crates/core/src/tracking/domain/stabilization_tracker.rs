use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::detection::domain::emotion_detector::FaceReading;
use crate::recommendation::domain::song_recommender::SongRecommender;
use crate::shared::annotation::FaceAnnotation;
use crate::shared::constants::STABILIZATION_DELAY;
use crate::shared::emotion::Emotion;
use crate::shared::face_box::FaceBox;
use crate::shared::generation::Generation;
use crate::tracking::domain::{age_estimator, look_comments};

/// Lifecycle of one tracked face. Locking is terminal: the captured
/// attributes never change again for that identity.
#[derive(Clone, Debug, PartialEq)]
pub enum FaceState {
    Stabilizing,
    Locked {
        emotion: Emotion,
        age: u32,
        generation: Generation,
    },
}

/// Everything remembered about one face identity.
///
/// Records are never dropped during a run; every distinct box ever
/// seen keeps its slot.
#[derive(Clone, Debug)]
pub struct FaceRecord {
    pub state: FaceState,
    pub look: &'static str,
    /// Set only on the record that consumed the global one-shot; the
    /// stored link may be empty for an unmapped emotion.
    pub song_link: Option<String>,
}

impl FaceRecord {
    fn new(look: &'static str) -> Self {
        Self {
            state: FaceState::Stabilizing,
            look,
            song_link: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, FaceState::Locked { .. })
    }
}

/// Per-face state machine over raw detector output.
///
/// Faces are keyed by their exact box coordinates, so identity only
/// holds while a face stays perfectly still; a one-pixel shift starts
/// a fresh record. Attributes stay in flux until a fixed delay after
/// session start and then freeze per face. The first face to freeze
/// may trigger the run's single song recommendation.
pub struct StabilizationTracker {
    records: HashMap<FaceBox, FaceRecord>,
    recommender: SongRecommender,
    session_start: Instant,
    stabilize_after: Duration,
    rng: StdRng,
}

impl StabilizationTracker {
    pub fn new(recommender: SongRecommender, session_start: Instant) -> Self {
        Self::with_settings(
            recommender,
            session_start,
            STABILIZATION_DELAY,
            StdRng::from_entropy(),
        )
    }

    pub fn with_settings(
        recommender: SongRecommender,
        session_start: Instant,
        stabilize_after: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            records: HashMap::new(),
            recommender,
            session_start,
            stabilize_after,
            rng,
        }
    }

    /// Folds one frame's detections into the tracked state and returns
    /// the annotations to draw, in observation order.
    ///
    /// A reading with no scores is a classifier contract violation:
    /// that face gets no annotation this frame and its record (if any)
    /// is left untouched.
    pub fn observe(&mut self, readings: &[FaceReading], now: Instant) -> Vec<FaceAnnotation> {
        let gate_open = now.duration_since(self.session_start) > self.stabilize_after;

        let mut annotations = Vec::with_capacity(readings.len());
        for reading in readings {
            let Some(dominant) = reading.scores.dominant() else {
                log::warn!("empty emotion scores for face {:?}, skipping", reading.face_box);
                continue;
            };

            let record = match self.records.entry(reading.face_box) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let look = look_comments::pick(&mut self.rng);
                    entry.insert(FaceRecord::new(look))
                }
            };

            if gate_open && !record.is_locked() {
                let age = age_estimator::estimate_age(reading.face_box.area(), &mut self.rng);
                let generation = Generation::from_age(age);
                record.state = FaceState::Locked {
                    emotion: dominant,
                    age,
                    generation,
                };
                record.song_link = self.recommender.recommend(generation, dominant);
                log::info!(
                    "face {:?} locked: {dominant}, age {age}, {generation}",
                    reading.face_box
                );
            }

            annotations.push(match &record.state {
                FaceState::Stabilizing => FaceAnnotation::stabilizing(reading.face_box),
                FaceState::Locked {
                    emotion,
                    age,
                    generation,
                } => FaceAnnotation::locked(
                    reading.face_box,
                    *emotion,
                    *age,
                    *generation,
                    record.look,
                ),
            });
        }
        annotations
    }

    pub fn record(&self, face_box: &FaceBox) -> Option<&FaceRecord> {
        self.records.get(face_box)
    }

    pub fn face_count(&self) -> usize {
        self.records.len()
    }

    pub fn locked_count(&self) -> usize {
        self.records.values().filter(|r| r.is_locked()).count()
    }

    pub fn recommendation_issued(&self) -> bool {
        self.recommender.issued()
    }
}
