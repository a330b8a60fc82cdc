use crate::core::{ConcreteChord, KeySignature, Mode, Quality, find_key, flatten_for_grid};
use crate::core::Quality::{Major as Maj, Minor as Min, Diminished as Dim};

/// Number of cells in the 3x3 chord grid.
pub const GRID_SIZE: usize = 9;

/// Scale degree behind each grid cell. The last two cells
/// repeat the tonic and the dominant to fill out the grid.
pub const GRID_DEGREES: [usize; GRID_SIZE] = [0, 1, 2, 3, 4, 5, 6, 0, 4];

const MAJOR_QUALITIES: [Quality; 7] = [Maj, Min, Min, Maj, Maj, Min, Dim];
const MINOR_QUALITIES: [Quality; 7] = [Min, Dim, Maj, Min, Min, Maj, Maj];

const MAJOR_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];
const MINOR_NUMERALS: [&str; 7] = ["i", "ii°", "III", "iv", "v", "VI", "VII"];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Seventh {
    Major,
    Dominant,
    Minor,
    HalfDiminished,
}

impl Seventh {
    fn suffix(&self) -> &'static str {
        match self {
            Seventh::Major => "maj7",
            Seventh::Dominant => "7",
            Seventh::Minor => "min7",
            // Sounds as a diminished seventh
            Seventh::HalfDiminished => "dim7",
        }
    }
}

const MAJOR_SEVENTHS: [(Seventh, &str); 7] = [
    (Seventh::Major, "Imaj7"),
    (Seventh::Minor, "ii7"),
    (Seventh::Minor, "iii7"),
    (Seventh::Major, "IVmaj7"),
    (Seventh::Dominant, "V7"),
    (Seventh::Minor, "vi7"),
    (Seventh::HalfDiminished, "viiø7"),
];

const MINOR_SEVENTHS: [(Seventh, &str); 7] = [
    (Seventh::Minor, "i7"),
    (Seventh::HalfDiminished, "iiø7"),
    (Seventh::Major, "IIImaj7"),
    (Seventh::Minor, "iv7"),
    (Seventh::Minor, "v7"),
    (Seventh::Major, "VImaj7"),
    (Seventh::Dominant, "VII7"),
];

/// Degrees lowered for the borrowed chords, with their labels.
const BORROWED: [(usize, &str); 3] = [(2, "bIII"), (5, "bVI"), (6, "bVII")];

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridEntry {
    pub name: String,
    pub roman: &'static str,
}

impl GridEntry {
    pub fn chord(&self) -> ConcreteChord {
        ConcreteChord::parse(&self.name)
    }

    pub fn pitches(&self) -> Vec<i32> {
        self.chord().pitches()
    }
}

/// Triad quality of a scale degree in the given mode.
pub fn diatonic_quality(mode: Mode, degree: usize) -> Quality {
    match mode {
        Mode::Major => MAJOR_QUALITIES[degree % 7],
        Mode::Minor => MINOR_QUALITIES[degree % 7],
    }
}

fn diatonic_numeral(mode: Mode, degree: usize) -> &'static str {
    match mode {
        Mode::Major => MAJOR_NUMERALS[degree % 7],
        Mode::Minor => MINOR_NUMERALS[degree % 7],
    }
}

/// The nine grid chords of a key.
pub fn triads(key: &KeySignature) -> Vec<GridEntry> {
    GRID_DEGREES.iter().map(|&degree| {
        let chord = ConcreteChord::new(key.note(degree), diatonic_quality(key.mode, degree));
        GridEntry {
            name: chord.to_string(),
            roman: diatonic_numeral(key.mode, degree),
        }
    }).collect()
}

/// Diatonic seventh chords on each of the seven degrees.
pub fn sevenths(key: &KeySignature) -> Vec<GridEntry> {
    let table = match key.mode {
        Mode::Major => &MAJOR_SEVENTHS,
        Mode::Minor => &MINOR_SEVENTHS,
    };
    table.iter().enumerate().map(|(degree, &(seventh, roman))| {
        GridEntry {
            name: format!("{}{}", key.note(degree), seventh.suffix()),
            roman,
        }
    }).collect()
}

/// Major triads on the lowered third, sixth and seventh degrees.
pub fn borrowed(key: &KeySignature) -> Vec<GridEntry> {
    BORROWED.iter().map(|&(degree, roman)| {
        let root = flatten_for_grid(key.note(degree));
        GridEntry {
            name: ConcreteChord::new(&root, Quality::Major).to_string(),
            roman,
        }
    }).collect()
}

/// Every chord table derived from one key.
#[derive(Debug, Clone)]
pub struct ChordGrid {
    pub key: &'static KeySignature,
    pub triads: Vec<GridEntry>,
    pub sevenths: Vec<GridEntry>,
    pub borrowed: Vec<GridEntry>,
}

impl ChordGrid {
    /// Build the tables for a key name ("None" means C Major).
    pub fn for_key(key_name: &str) -> Option<ChordGrid> {
        let key = find_key(key_name)?;
        Some(ChordGrid {
            key,
            triads: triads(key),
            sevenths: sevenths(key),
            borrowed: borrowed(key),
        })
    }

    pub fn entry(&self, cell: usize) -> Option<&GridEntry> {
        self.triads.get(cell)
    }
}

/// The nine grid chords for a key name; empty if the key is unknown.
pub fn build_grid(key_name: &str) -> Vec<GridEntry> {
    match find_key(key_name) {
        Some(key) => triads(key),
        None => vec![],
    }
}

pub fn build_sevenths(key_name: &str) -> Vec<GridEntry> {
    find_key(key_name).map(sevenths).unwrap_or_default()
}

pub fn build_borrowed(key_name: &str) -> Vec<GridEntry> {
    find_key(key_name).map(borrowed).unwrap_or_default()
}
