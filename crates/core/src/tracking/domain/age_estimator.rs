//! Coarse age guessing from face-box size.
//!
//! Bigger boxes are assumed closer to the camera and older. The guess
//! is a uniform roll within the bracket, made once per face at lock
//! time and frozen afterwards.

use rand::Rng;

const ADULT_AREA: i64 = 50_000;
const YOUNG_ADULT_AREA: i64 = 30_000;

const ADULT_AGES: std::ops::RangeInclusive<u32> = 25..=45;
const YOUNG_ADULT_AGES: std::ops::RangeInclusive<u32> = 18..=25;
const TEEN_AGES: std::ops::RangeInclusive<u32> = 12..=18;

/// Rolls an age for a face with the given box area in pixels.
///
/// Brackets: area > 50000 rolls 25-45, area > 30000 rolls 18-25,
/// anything smaller (zero included) rolls 12-18.
pub fn estimate_age<R: Rng>(face_area: i64, rng: &mut R) -> u32 {
    if face_area > ADULT_AREA {
        rng.gen_range(ADULT_AGES)
    } else if face_area > YOUNG_ADULT_AREA {
        rng.gen_range(YOUNG_ADULT_AGES)
    } else {
        rng.gen_range(TEEN_AGES)
    }
}
