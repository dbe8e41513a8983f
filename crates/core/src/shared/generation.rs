use std::fmt;

/// Generational cohort derived from an estimated age.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Generation {
    GenZ,
    Millennial,
    GenX,
    Boomer,
}

impl Generation {
    /// Maps an age in years onto its cohort.
    ///
    /// Bands: 0-24 Gen Z, 25-40 Millennial, 41-56 Gen X, 57+ Boomer.
    pub fn from_age(age: u32) -> Self {
        if age <= 24 {
            Generation::GenZ
        } else if age <= 40 {
            Generation::Millennial
        } else if age <= 56 {
            Generation::GenX
        } else {
            Generation::Boomer
        }
    }

    pub const ALL: [Generation; 4] = [
        Generation::GenZ,
        Generation::Millennial,
        Generation::GenX,
        Generation::Boomer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Generation::GenZ => "Gen Z",
            Generation::Millennial => "Millennial",
            Generation::GenX => "Gen X",
            Generation::Boomer => "Boomer",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
