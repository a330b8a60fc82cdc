use std::fmt;
use std::collections::HashMap;
use lazy_static::lazy_static;
use log::warn;

/// Semitones from the tonic for scale degrees 0..=7.
pub const MAJOR: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];
pub const MINOR: [i32; 8] = [0, 2, 3, 5, 7, 8, 10, 12];

/// Key name substituted for the reserved "None" selection.
pub const DEFAULT_KEY: &str = "C Major";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    Major,
    Minor
}

impl Mode {
    pub fn semitones(&self) -> [i32; 8] {
        match self {
            Mode::Major => MAJOR,
            Mode::Minor => MINOR,
        }
    }

    pub fn is_major(&self) -> bool {
        *self == Mode::Major
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor"
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KeySignature {
    pub name: &'static str,
    pub mode: Mode,

    /// Note names for scale degrees 0..=7;
    /// degree 7 repeats the tonic an octave up.
    pub notes: [&'static str; 8],

    /// Semitones from the tonic, parallel to `notes`.
    pub semitones: [i32; 8],
}

impl KeySignature {
    pub fn tonic(&self) -> &'static str {
        self.notes[0]
    }

    /// Note name at a scale degree, wrapping past the octave.
    pub fn note(&self, degree: usize) -> &'static str {
        self.notes[degree % 7]
    }
}

macro_rules! major {
    ($name:expr, [$($note:expr),*]) => {
        KeySignature { name: $name, mode: Mode::Major, notes: [$($note),*], semitones: MAJOR }
    };
}

macro_rules! minor {
    ($name:expr, [$($note:expr),*]) => {
        KeySignature { name: $name, mode: Mode::Minor, notes: [$($note),*], semitones: MINOR }
    };
}

/// Every key a caller may request, by exact name.
pub static KEY_SIGNATURES: [KeySignature; 24] = [
    major!("C Major", ["C", "D", "E", "F", "G", "A", "B", "C"]),
    major!("Db Major", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C", "Db"]),
    major!("D Major", ["D", "E", "F#", "G", "A", "B", "C#", "D"]),
    major!("Eb Major", ["Eb", "F", "G", "Ab", "Bb", "C", "D", "Eb"]),
    major!("E Major", ["E", "F#", "G#", "A", "B", "C#", "D#", "E"]),
    major!("F Major", ["F", "G", "A", "Bb", "C", "D", "E", "F"]),
    major!("F# Major", ["F#", "G#", "A#", "B", "C#", "D#", "E#", "F#"]),
    major!("G Major", ["G", "A", "B", "C", "D", "E", "F#", "G"]),
    major!("Ab Major", ["Ab", "Bb", "C", "Db", "Eb", "F", "G", "Ab"]),
    major!("A Major", ["A", "B", "C#", "D", "E", "F#", "G#", "A"]),
    major!("Bb Major", ["Bb", "C", "D", "Eb", "F", "G", "A", "Bb"]),
    major!("B Major", ["B", "C#", "D#", "E", "F#", "G#", "A#", "B"]),
    minor!("A Minor", ["A", "B", "C", "D", "E", "F", "G", "A"]),
    minor!("Bb Minor", ["Bb", "C", "Db", "Eb", "F", "Gb", "Ab", "Bb"]),
    minor!("B Minor", ["B", "C#", "D", "E", "F#", "G", "A", "B"]),
    minor!("C Minor", ["C", "D", "Eb", "F", "G", "Ab", "Bb", "C"]),
    minor!("C# Minor", ["C#", "D#", "E", "F#", "G#", "A", "B", "C#"]),
    minor!("D Minor", ["D", "E", "F", "G", "A", "Bb", "C", "D"]),
    minor!("D# Minor", ["D#", "E#", "F#", "G#", "A#", "B", "C#", "D#"]),
    minor!("E Minor", ["E", "F#", "G", "A", "B", "C", "D", "E"]),
    minor!("F Minor", ["F", "G", "Ab", "Bb", "C", "Db", "Eb", "F"]),
    minor!("F# Minor", ["F#", "G#", "A", "B", "C#", "D", "E", "F#"]),
    minor!("G Minor", ["G", "A", "Bb", "C", "D", "Eb", "F", "G"]),
    minor!("G# Minor", ["G#", "A#", "B", "C#", "D#", "E", "F#", "G#"]),
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, &'static KeySignature> = KEY_SIGNATURES.iter()
        .map(|ks| (ks.name, ks))
        .collect();
}

/// Exact-match lookup; no case or spacing normalization.
pub fn lookup(name: &str) -> Option<&'static KeySignature> {
    BY_NAME.get(name).copied()
}

/// Substitute the default key for the reserved "None" name.
pub fn resolve_key_name(name: &str) -> &str {
    if name == "None" {
        DEFAULT_KEY
    } else {
        name
    }
}

/// Resolve "None" and look the key up, warning on a miss.
pub fn find_key(name: &str) -> Option<&'static KeySignature> {
    let key = lookup(resolve_key_name(name));
    if key.is_none() {
        warn!("Unknown key `{}`", name);
    }
    key
}

/// Catalog names in display order, for key selectors.
pub fn key_names() -> Vec<&'static str> {
    KEY_SIGNATURES.iter().map(|ks| ks.name).collect()
}
