mod catalog;

pub use catalog::{Catalog, CatalogError, ChordPattern, Genre, GenreParseError, RhythmPattern, PATTERN_LEN};
use log::warn;
use crate::core::{ConcreteChord, KeySignature, find_key, flatten, resolve, split_root, symbol_quality};
use crate::grid::{GridEntry, GRID_DEGREES, GRID_SIZE, triads};

/// Grid cell a progression starts from. Cell 7 repeats the tonic
/// and is read as cell 0; unknown cells also fall back to cell 0.
fn start_cell(cell_index: usize) -> usize {
    match cell_index {
        7 => 0,
        c if c < GRID_SIZE => c,
        c => {
            warn!("Grid cell {} out of range, starting from the tonic", c);
            0
        }
    }
}

/// Drop the triad quality from a chord name and mark it as a seventh,
/// e.g. "Dmin" -> "D7".
fn as_seventh(name: &str) -> String {
    let stripped = name
        .replace("maj", "")
        .replace("min", "")
        .replace("dim", "");
    format!("{}7", stripped)
}

/// Flatten the root of a chord name, keeping its suffix.
fn flatten_root(name: &str) -> String {
    let (root, suffix) = split_root(name);
    format!("{}{}", flatten(root), suffix)
}

/// Resolve one pattern symbol against a key's grid, counting
/// scale degrees from `start_degree`.
fn resolve_step(key: &KeySignature, grid: &[GridEntry], start_degree: usize, symbol: &str) -> String {
    let offset = resolve(symbol, key.mode.is_major());
    let degree = (start_degree + offset) % 7;

    // Cells 0..7 hold degrees 0..7 in order
    let base = &grid[degree];
    let mut name = match symbol_quality(symbol) {
        Some(quality) => ConcreteChord::new(key.note(degree), quality).to_string(),
        None => base.name.clone(),
    };

    if symbol.contains('7') {
        name = as_seventh(&name);
    }
    if symbol.starts_with('b') {
        name = flatten_root(&name);
    }
    name
}

/// Chord names for a roman numeral pattern played from a grid cell.
///
/// Each symbol is a degree offset from the cell's scale degree,
/// wrapping within the octave. Returns nothing for unknown keys.
pub fn build_progression<S: AsRef<str>>(cell_index: usize, key_name: &str, pattern: &[S]) -> Vec<String> {
    let key = match find_key(key_name) {
        Some(key) => key,
        None => return vec![],
    };
    let grid = triads(key);
    if grid.len() < GRID_SIZE {
        return vec![];
    }

    let start_degree = GRID_DEGREES[start_cell(cell_index)];
    pattern.iter()
        .map(|symbol| resolve_step(key, &grid, start_degree, symbol.as_ref()))
        .collect()
}
