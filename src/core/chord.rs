use std::fmt;
use log::warn;
use super::note::{Note, note_to_semitone, split_root};
use super::interval::{
    Interval, MAJOR_TRIAD, MINOR_TRIAD, DIMINISHED_TRIAD,
    MINOR_SEVENTH, DIMINISHED_SEVENTH};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
}

impl Quality {
    /// Suffix used in chord names, e.g. the "min" of "Dmin".
    pub fn suffix(&self) -> &'static str {
        match self {
            Quality::Major => "maj",
            Quality::Minor => "min",
            Quality::Diminished => "dim",
        }
    }

    /// Classify a chord-name suffix. Anything unrecognized is major.
    pub fn from_suffix(suffix: &str) -> Quality {
        if suffix.starts_with("dim") {
            Quality::Diminished
        } else if suffix.starts_with("min") {
            Quality::Minor
        } else {
            Quality::Major
        }
    }

    /// Intervals above the root, ascending.
    ///
    /// Every seventh on a major or minor triad is a minor seventh, so
    /// "maj7" names sound as dominant sevenths, and a diminished triad
    /// takes a diminished seventh rather than a half-diminished one.
    pub fn intervals(&self, seventh: bool) -> Vec<Interval> {
        let (triad, top) = match self {
            Quality::Major => (MAJOR_TRIAD, MINOR_SEVENTH),
            Quality::Minor => (MINOR_TRIAD, MINOR_SEVENTH),
            Quality::Diminished => (DIMINISHED_TRIAD, DIMINISHED_SEVENTH),
        };
        let mut intervals: Vec<Interval> = triad.iter().map(|&i| i.into()).collect();
        if seventh {
            intervals.push(top.into());
        }
        intervals
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// A chord resolved to a root name and quality,
/// e.g. "F#dim" or "Amin7".
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConcreteChord {
    pub root: String,
    pub quality: Quality,
    pub seventh: bool,
}

impl ConcreteChord {
    pub fn new(root: &str, quality: Quality) -> ConcreteChord {
        ConcreteChord {
            root: root.to_string(),
            quality,
            seventh: false,
        }
    }

    /// Add a seventh on top of the triad
    pub fn seventh(mut self) -> ConcreteChord {
        self.seventh = true;
        self
    }

    /// Permissively parse a chord name. The root is the first letter
    /// plus an optional `#`/`b`; quality comes from the start of the
    /// remaining suffix and a "7" anywhere in it adds a seventh.
    pub fn parse(name: &str) -> ConcreteChord {
        let (root, suffix) = split_root(name);
        ConcreteChord {
            root: root.to_string(),
            quality: Quality::from_suffix(suffix),
            seventh: suffix.contains('7'),
        }
    }

    /// Pitch class of the root; unknown roots fall back to C.
    pub fn root_semitone(&self) -> i32 {
        note_to_semitone(&self.root).unwrap_or_else(|| {
            warn!("Unknown chord root `{}`, using C", self.root);
            0
        })
    }

    pub fn intervals(&self) -> Vec<Interval> {
        self.quality.intervals(self.seventh)
    }

    /// Semitones from C of the reference octave, ascending.
    pub fn pitches(&self) -> Vec<i32> {
        let base = self.root_semitone();
        self.intervals().iter()
            .map(|intv| base + intv.semitones)
            .collect()
    }

    /// The chord's notes voiced upward from `octave`.
    pub fn notes(&self, octave: i32) -> Vec<Note> {
        self.pitches().into_iter()
            .map(|p| Note::new(p, octave))
            .collect()
    }

    pub fn describe_notes(&self, octave: i32) -> Vec<String> {
        self.notes(octave).iter().map(|n| n.to_string()).collect()
    }
}

impl fmt::Display for ConcreteChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality)?;
        if self.seventh {
            write!(f, "7")?;
        }
        Ok(())
    }
}

/// Semitone offsets of the named chord, e.g. "Amin7" -> [9, 12, 16, 19].
pub fn pitches_for(chord_name: &str) -> Vec<i32> {
    ConcreteChord::parse(chord_name).pitches()
}
