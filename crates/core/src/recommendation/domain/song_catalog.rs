use std::collections::HashMap;

use crate::shared::emotion::Emotion;
use crate::shared::generation::Generation;

/// One recommendable track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Song {
    pub title: &'static str,
    pub url: &'static str,
}

/// Returned for (generation, emotion) pairs the catalog has no entry
/// for. The empty URL tells callers there is nothing to open.
pub const UNKNOWN_SONG: Song = Song {
    title: "Unknown",
    url: "",
};

/// Immutable generation x emotion song table, built once at startup.
///
/// Only four of the seven emotion labels are mapped; the rest resolve
/// to [`UNKNOWN_SONG`].
pub struct SongCatalog {
    entries: HashMap<(Generation, Emotion), Song>,
}

impl SongCatalog {
    pub fn new() -> Self {
        use Emotion::{Angry, Happy, Neutral, Sad};
        use Generation::{Boomer, GenX, GenZ, Millennial};

        let song = |title, url| Song { title, url };
        let entries = HashMap::from([
            (
                (GenZ, Happy),
                song(
                    "Blinding Lights - The Weeknd",
                    "https://www.youtube.com/watch?v=4NRXx6U8ABQ",
                ),
            ),
            (
                (GenZ, Sad),
                song(
                    "Someone You Loved - Lewis Capaldi",
                    "https://www.youtube.com/watch?v=bCuhuePlP8o",
                ),
            ),
            (
                (GenZ, Angry),
                song(
                    "bad guy - Billie Eilish",
                    "https://www.youtube.com/watch?v=DyDfgMOUjCI",
                ),
            ),
            (
                (GenZ, Neutral),
                song(
                    "Levitating - Dua Lipa",
                    "https://www.youtube.com/watch?v=TUVcZfQe-Kw",
                ),
            ),
            (
                (Millennial, Happy),
                song(
                    "Uptown Funk - Mark Ronson ft. Bruno Mars",
                    "https://www.youtube.com/watch?v=OPf0YbXqDm0",
                ),
            ),
            (
                (Millennial, Sad),
                song(
                    "Fix You - Coldplay",
                    "https://www.youtube.com/watch?v=k4V3Mo61fJM",
                ),
            ),
            (
                (Millennial, Angry),
                song(
                    "Rolling in the Deep - Adele",
                    "https://www.youtube.com/watch?v=rYEDA3JcQqw",
                ),
            ),
            (
                (Millennial, Neutral),
                song(
                    "Happy - Pharrell Williams",
                    "https://www.youtube.com/watch?v=ZbZSe6N_BXs",
                ),
            ),
            (
                (GenX, Happy),
                song(
                    "Don't Stop Believin' - Journey",
                    "https://www.youtube.com/watch?v=1k8craCGpgs",
                ),
            ),
            (
                (GenX, Sad),
                song(
                    "Tears in Heaven - Eric Clapton",
                    "https://www.youtube.com/watch?v=JxPj3GAYYZ0",
                ),
            ),
            (
                (GenX, Angry),
                song(
                    "Smells Like Teen Spirit - Nirvana",
                    "https://www.youtube.com/watch?v=hTWKbfoikeg",
                ),
            ),
            (
                (GenX, Neutral),
                song(
                    "Take On Me - a-ha",
                    "https://www.youtube.com/watch?v=djV11Xbc914",
                ),
            ),
            (
                (Boomer, Happy),
                song(
                    "Here Comes The Sun - The Beatles",
                    "https://www.youtube.com/watch?v=KQetemT1sWc",
                ),
            ),
            (
                (Boomer, Sad),
                song(
                    "Yesterday - The Beatles",
                    "https://www.youtube.com/watch?v=jo505ZyaCbA",
                ),
            ),
            (
                (Boomer, Angry),
                song(
                    "Born to Be Wild - Steppenwolf",
                    "https://www.youtube.com/watch?v=egMWlD3fLJ8",
                ),
            ),
            (
                (Boomer, Neutral),
                song(
                    "Hotel California - Eagles",
                    "https://www.youtube.com/watch?v=EqPtz5qN7HM",
                ),
            ),
        ]);
        Self { entries }
    }

    pub fn lookup(&self, generation: Generation, emotion: Emotion) -> Song {
        self.entries
            .get(&(generation, emotion))
            .copied()
            .unwrap_or(UNKNOWN_SONG)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SongCatalog {
    fn default() -> Self {
        Self::new()
    }
}
