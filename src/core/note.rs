use super::interval::Interval;
use thiserror::Error;
use std::{fmt, str::FromStr};
use std::ops::{Add, Sub};

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// Semitone offset of a natural letter from C.
fn letter_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

fn accidental_offset(accidentals: &str) -> i32 {
    accidentals.matches('#').count() as i32 - accidentals.matches('b').count() as i32
}

/// Pitch class (0-11, C = 0) of a note name such as "C", "F#", "Bb" or "E#".
pub fn note_to_semitone(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let base = letter_semitone(chars.next()?)?;
    let rest = chars.as_str();
    if !rest.chars().all(|c| c == '#' || c == 'b') {
        return None;
    }
    Some((base + accidental_offset(rest)).rem_euclid(12))
}

/// Sharp spelling of a pitch class.
pub fn semitone_to_note(semitone: i32) -> &'static str {
    SHARP_NAMES[semitone.rem_euclid(12) as usize]
}

/// Octave-qualified name of a semitone offset counted from C of
/// `octave`, e.g. `note_name(13, 4) == "C#5"`.
pub fn note_name(semitone: i32, octave: i32) -> String {
    Note::new(semitone, octave).to_string()
}

/// Split a chord or note name into its root (letter plus an optional
/// single `#`/`b`) and whatever follows it.
pub fn split_root(name: &str) -> (&str, &str) {
    let mut indices = name.char_indices();
    let root_end = match indices.next() {
        None => return ("", ""),
        Some((_, letter)) => {
            let after_letter = letter.len_utf8();
            match indices.next() {
                Some((i, '#')) | Some((i, 'b')) => i + 1,
                _ => after_letter,
            }
        }
    };
    name.split_at(root_end)
}

/// Lower a flat note by one more semitone, preferring natural letters.
fn double_flatten(note: &str) -> String {
    match note_to_semitone(note) {
        Some(pc) => FLAT_NAMES[(pc - 1).rem_euclid(12) as usize].to_string(),
        None => note.to_string(),
    }
}

/// Flatten a note for accidental post-processing of progressions.
///
/// Sharps lose their accidental, naturals move down one semitone
/// preferring a natural letter where one exists (C -> B, F -> E),
/// flats are lowered again (Eb -> D).
pub fn flatten(note: &str) -> String {
    if note.contains('#') {
        return note.replace('#', "");
    }
    match note {
        "C" => "B".to_string(),
        "D" => "Db".to_string(),
        "E" => "Eb".to_string(),
        "F" => "E".to_string(),
        "G" => "Gb".to_string(),
        "A" => "Ab".to_string(),
        "B" => "Bb".to_string(),
        _ if note.ends_with('b') => double_flatten(note),
        _ => note.to_string(),
    }
}

/// Flatten a note for the borrowed-chord table.
///
/// Differs from [`flatten`] on naturals: the letter is kept and a
/// literal `b` appended, so C -> Cb and F -> Fb.
pub fn flatten_for_grid(note: &str) -> String {
    if note.contains('#') {
        return note.replace('#', "");
    }
    if note.ends_with('b') {
        return double_flatten(note);
    }
    if note.chars().next().and_then(letter_semitone).is_some() {
        format!("{}b", note)
    } else {
        note.to_string()
    }
}

/// A concrete pitch. `semitones` is the MIDI note number, so C4 = 60.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Note {
    pub semitones: i32,
}

impl Note {
    /// The note `semitone` steps above C of `octave`.
    pub fn new(semitone: i32, octave: i32) -> Note {
        Note {
            semitones: (octave + 1) * 12 + semitone
        }
    }

    pub fn octave(&self) -> i32 {
        self.semitones.div_euclid(12) - 1
    }

    pub fn pitch_class(&self) -> i32 {
        self.semitones.rem_euclid(12)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum NoteParseError {
    #[error("Invalid note name `{0}`")]
    InvalidName(String),

    #[error("Couldn't parse octave")]
    ParseIntError(#[from] std::num::ParseIntError),
}

/// Try to parse a note from a string, e.g. "C#3".
impl FromStr for Note {
    type Err = NoteParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s.find(|c: char| c == '-' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let (name, octave) = s.split_at(split);
        let pc = note_to_semitone(name)
            .ok_or_else(|| NoteParseError::InvalidName(name.to_string()))?;
        let octave = octave.parse::<i32>()?;
        Ok(Note::new(pc, octave))
    }
}

impl TryFrom<&str> for Note {
    type Error = NoteParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_str(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", semitone_to_note(self.pitch_class()), self.octave())
    }
}

/// Add an interval to this note.
impl Add<Interval> for Note {
    type Output = Self;

    fn add(self, intv: Interval) -> Self {
        Self {
            semitones: self.semitones + intv.semitones
        }
    }
}

/// Subtract an interval from this note.
impl Sub<Interval> for Note {
    type Output = Self;

    fn sub(self, intv: Interval) -> Self {
        Self {
            semitones: self.semitones - intv.semitones
        }
    }
}
