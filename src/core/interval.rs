use std::fmt;

const NAMES: [&str; 12] = [
    "P1",
    "m2",
    "M2",
    "m3",
    "M3",
    "P4",
    "d5",
    "P5",
    "m6",
    "M6",
    "m7",
    "M7",
];

/// Triad intervals, relative to the chord root.
pub const MAJOR_TRIAD: [i32; 3] = [0, 4, 7];
pub const MINOR_TRIAD: [i32; 3] = [0, 3, 7];
pub const DIMINISHED_TRIAD: [i32; 3] = [0, 3, 6];

/// Seventh added on top of a major or minor triad.
pub const MINOR_SEVENTH: i32 = 10;

/// Seventh added on top of a diminished triad.
pub const DIMINISHED_SEVENTH: i32 = 9;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Interval {
    pub semitones: i32
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idx = self.semitones.rem_euclid(12) as usize;
        let name = NAMES[idx];
        write!(f, "{}", name)
    }
}

/// Generate an interval from an integer.
impl From<i32> for Interval {
    fn from(i: i32) -> Self {
        Interval { semitones: i }
    }
}
