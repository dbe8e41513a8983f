use std::collections::HashMap;
use std::fmt;

/// The seven facial-expression classes the emotion model distinguishes.
///
/// Declaration order doubles as the tie-break order for dominant-emotion
/// selection: on equal scores the earlier variant wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label confidence scores for one face, as reported by the detector.
///
/// May be empty when the classifier produced nothing usable for a face;
/// callers must treat that as "no reading" rather than a neutral one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmotionScores {
    scores: HashMap<Emotion, f32>,
}

impl EmotionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(Emotion, f32)]) -> Self {
        Self {
            scores: pairs.iter().copied().collect(),
        }
    }

    pub fn insert(&mut self, emotion: Emotion, score: f32) {
        self.scores.insert(emotion, score);
    }

    pub fn get(&self, emotion: Emotion) -> Option<f32> {
        self.scores.get(&emotion).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The highest-scoring label, or `None` when no scores are present.
    ///
    /// Ties resolve to the label declared first in [`Emotion::ALL`].
    pub fn dominant(&self) -> Option<Emotion> {
        let mut best: Option<(Emotion, f32)> = None;
        for emotion in Emotion::ALL {
            let Some(score) = self.get(emotion) else {
                continue;
            };
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((emotion, score)),
            }
        }
        best.map(|(emotion, _)| emotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_as_str_is_lowercase() {
        for emotion in Emotion::ALL {
            let s = emotion.as_str();
            assert_eq!(s, s.to_lowercase());
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Emotion::Happy.to_string(), "happy");
        assert_eq!(Emotion::Neutral.to_string(), "neutral");
    }

    // ── Dominant selection ───────────────────────────────────────────

    #[test]
    fn test_dominant_empty_is_none() {
        assert_eq!(EmotionScores::new().dominant(), None);
    }

    #[test]
    fn test_dominant_single_label() {
        let scores = EmotionScores::from_pairs(&[(Emotion::Sad, 0.2)]);
        assert_eq!(scores.dominant(), Some(Emotion::Sad));
    }

    #[test]
    fn test_dominant_picks_highest() {
        let scores = EmotionScores::from_pairs(&[
            (Emotion::Angry, 0.1),
            (Emotion::Happy, 0.7),
            (Emotion::Neutral, 0.2),
        ]);
        assert_eq!(scores.dominant(), Some(Emotion::Happy));
    }

    #[rstest]
    #[case::angry_beats_neutral(&[(Emotion::Neutral, 0.5), (Emotion::Angry, 0.5)], Emotion::Angry)]
    #[case::happy_beats_sad(&[(Emotion::Sad, 0.4), (Emotion::Happy, 0.4)], Emotion::Happy)]
    #[case::three_way(
        &[(Emotion::Surprise, 0.3), (Emotion::Fear, 0.3), (Emotion::Neutral, 0.3)],
        Emotion::Fear
    )]
    fn test_dominant_tie_breaks_on_declared_order(
        #[case] pairs: &[(Emotion, f32)],
        #[case] expected: Emotion,
    ) {
        assert_eq!(EmotionScores::from_pairs(pairs).dominant(), Some(expected));
    }

    #[test]
    fn test_dominant_is_deterministic() {
        let pairs = [
            (Emotion::Angry, 0.25),
            (Emotion::Disgust, 0.25),
            (Emotion::Fear, 0.25),
            (Emotion::Surprise, 0.25),
        ];
        let first = EmotionScores::from_pairs(&pairs).dominant();
        for _ in 0..50 {
            assert_eq!(EmotionScores::from_pairs(&pairs).dominant(), first);
        }
    }

    #[test]
    fn test_insert_overwrites() {
        let mut scores = EmotionScores::new();
        scores.insert(Emotion::Happy, 0.1);
        scores.insert(Emotion::Happy, 0.9);
        assert_eq!(scores.get(Emotion::Happy), Some(0.9));
    }
}
