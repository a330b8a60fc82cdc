use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use lazy_static::lazy_static;
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::{fmt, fs::File, io::{BufReader, Read}, path::Path, str::FromStr};

/// Steps in every chord and rhythm pattern.
pub const PATTERN_LEN: usize = 8;

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::parse(include_str!("patterns.yaml"))
        .expect("built-in pattern catalog is valid");
}

#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Pop,
    Rock,
    Funk,
    Jazz,
    Blues,
    Latin,
}

impl Genre {
    pub const ALL: [Genre; 6] = [Genre::Pop, Genre::Rock, Genre::Funk, Genre::Jazz, Genre::Blues, Genre::Latin];

    pub fn tag(&self) -> &'static str {
        match self {
            Genre::Pop => "pop",
            Genre::Rock => "rock",
            Genre::Funk => "funk",
            Genre::Jazz => "jazz",
            Genre::Blues => "blues",
            Genre::Latin => "latin",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown genre `{0}`")]
pub struct GenreParseError(String);

impl FromStr for Genre {
    type Err = GenreParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL.iter()
            .find(|g| g.tag() == s.to_lowercase())
            .copied()
            .ok_or_else(|| GenreParseError(s.to_string()))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChordPattern {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Roman numeral symbols, one per step
    #[serde(deserialize_with = "from_symbols")]
    pub roman: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RhythmPattern {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Duration multiplier per step
    pub pattern: Vec<f32>,

    /// Loudness per step, in [0, 1]
    pub velocities: Vec<f32>,
}

/// Lets us write patterns as space-separated strings in yaml,
/// e.g. "I V vi IV" instead of "[I, V, vi, IV]"
fn from_symbols<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let symbols: String = Deserialize::deserialize(deserializer)?;
    Ok(symbols.split_whitespace().map(String::from).collect())
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Couldn't read pattern file")]
    Io(#[from] std::io::Error),

    #[error("Couldn't parse pattern file")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Pattern `{id}` has {len} steps, expected {}", PATTERN_LEN)]
    PatternLength { id: String, len: usize },

    #[error("Pattern `{id}` has velocity {value} outside [0, 1]")]
    VelocityRange { id: String, value: f32 },

    #[error("Pattern `{id}` has duration {value}, expected a positive multiplier")]
    DurationRange { id: String, value: f32 },

    #[error("Duplicate pattern id `{0}`")]
    DuplicateId(String),
}

/// Genre-grouped chord and rhythm patterns.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    chords: BTreeMap<Genre, Vec<ChordPattern>>,

    #[serde(default)]
    rhythms: BTreeMap<Genre, Vec<RhythmPattern>>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn parse(yaml: &str) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = serde_yaml::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let file = File::open(path)?;
        let catalog = Catalog::from_reader(BufReader::new(file))?;
        debug!("Loaded {} chord patterns from {}", catalog.chords.values().map(Vec::len).sum::<usize>(), path.display());
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for pattern in self.chords.values().flatten() {
            if pattern.roman.len() != PATTERN_LEN {
                return Err(CatalogError::PatternLength { id: pattern.id.clone(), len: pattern.roman.len() });
            }
            if !ids.insert(pattern.id.as_str()) {
                return Err(CatalogError::DuplicateId(pattern.id.clone()));
            }
        }

        for rhythm in self.rhythms.values().flatten() {
            for len in [rhythm.pattern.len(), rhythm.velocities.len()] {
                if len != PATTERN_LEN {
                    return Err(CatalogError::PatternLength { id: rhythm.id.clone(), len });
                }
            }
            if let Some(&value) = rhythm.pattern.iter().find(|&&d| !(d > 0.)) {
                return Err(CatalogError::DurationRange { id: rhythm.id.clone(), value });
            }
            if let Some(&value) = rhythm.velocities.iter().find(|&&v| !(0. ..=1.).contains(&v)) {
                return Err(CatalogError::VelocityRange { id: rhythm.id.clone(), value });
            }
            if !ids.insert(rhythm.id.as_str()) {
                return Err(CatalogError::DuplicateId(rhythm.id.clone()));
            }
        }
        Ok(())
    }

    /// Genres with at least one chord or rhythm pattern.
    pub fn genres(&self) -> Vec<Genre> {
        let mut genres: Vec<Genre> = self.chords.keys()
            .chain(self.rhythms.keys())
            .copied()
            .collect();
        genres.sort();
        genres.dedup();
        genres
    }

    pub fn chord_patterns(&self, genre: Genre) -> &[ChordPattern] {
        self.chords.get(&genre).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn rhythm_patterns(&self, genre: Genre) -> &[RhythmPattern] {
        self.rhythms.get(&genre).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find_chord_pattern(&self, id: &str) -> Option<&ChordPattern> {
        self.chords.values().flatten().find(|p| p.id == id)
    }

    pub fn find_rhythm_pattern(&self, id: &str) -> Option<&RhythmPattern> {
        self.rhythms.values().flatten().find(|p| p.id == id)
    }

    /// Randomly chooses a chord pattern for a genre.
    pub fn random_chord_pattern(&self, genre: Genre) -> Option<&ChordPattern> {
        let mut rng = rand::thread_rng();
        self.chord_patterns(genre).choose(&mut rng)
    }

    /// Randomly chooses a rhythm pattern for a genre.
    pub fn random_rhythm_pattern(&self, genre: Genre) -> Option<&RhythmPattern> {
        let mut rng = rand::thread_rng();
        self.rhythm_patterns(genre).choose(&mut rng)
    }
}
