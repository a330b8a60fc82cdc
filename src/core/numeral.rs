use regex::Regex;
use std::collections::HashMap;
use lazy_static::lazy_static;
use log::{debug, warn};
use super::chord::Quality;

pub const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Flattened symbols resolve to the degree of their unflattened
/// counterpart; the flat itself is applied to the chord root later.
const BORROWED: [(&str, usize); 6] = [
    ("bVII", 6),
    ("bIII", 2),
    ("bVI", 5),
    ("bii", 1),
    ("bV", 4),
    ("bI", 0),
];

const MAJOR_SYMBOLS: [(&str, usize); 20] = [
    ("I", 0), ("ii", 1), ("iii", 2), ("IV", 3), ("V", 4), ("vi", 5),
    ("vii°", 6), ("viio", 6), ("vii", 6),
    ("I7", 0), ("Imaj7", 0), ("ii7", 1), ("iii7", 2), ("IV7", 3), ("IVmaj7", 3),
    ("V7", 4), ("vi7", 5), ("vii7", 6), ("viiø7", 6), ("vii°7", 6),
];

const MINOR_SYMBOLS: [(&str, usize); 22] = [
    ("i", 0), ("ii°", 1), ("iio", 1), ("ii", 1), ("III", 2), ("iv", 3),
    ("v", 4), ("V", 4), ("VI", 5), ("VII", 6), ("vii°", 6),
    ("i7", 0), ("ii7", 1), ("iiø7", 1), ("III7", 2), ("IIImaj7", 2),
    ("iv7", 3), ("v7", 4), ("V7", 4), ("VI7", 5), ("VImaj7", 5), ("VII7", 6),
];

lazy_static! {
    static ref MAJOR_TABLE: HashMap<&'static str, usize> = MAJOR_SYMBOLS.iter()
        .chain(BORROWED.iter())
        .copied()
        .collect();
    static ref MINOR_TABLE: HashMap<&'static str, usize> = MINOR_SYMBOLS.iter()
        .chain(BORROWED.iter())
        .copied()
        .collect();
    static ref LONGEST_SYMBOL: usize = MAJOR_TABLE.keys()
        .chain(MINOR_TABLE.keys())
        .map(|s| s.len())
        .max()
        .unwrap_or(0);
    static ref DECORATION_RE: Regex = Regex::new(r"maj|min|[°øo7Mmb#]").unwrap();
}

fn table(is_major: bool) -> &'static HashMap<&'static str, usize> {
    if is_major {
        &MAJOR_TABLE
    } else {
        &MINOR_TABLE
    }
}

fn numeral_to_index(numeral: &str) -> Option<usize> {
    NUMERALS.iter().position(|&n| n == numeral.to_uppercase())
}

/// Resolve a roman numeral symbol to a scale-degree offset in 0..=6.
///
/// Never fails: symbols that survive every fallback resolve to the tonic.
pub fn resolve(symbol: &str, is_major: bool) -> usize {
    // Strip leading flats one at a time, checking the table after each
    let mut rest = symbol;
    loop {
        if rest.len() > *LONGEST_SYMBOL {
            if let Some(unflattened) = rest.strip_prefix('b') {
                rest = unflattened;
                continue;
            }
            break;
        }
        if let Some(degree) = table(is_major).get(rest) {
            if rest.len() != symbol.len() {
                debug!("Resolved `{}` through `{}` to degree {}", symbol, rest, degree);
            }
            return *degree;
        }
        match rest.strip_prefix('b') {
            Some(unflattened) => rest = unflattened,
            None => break,
        }
    }

    let flipped = if is_major {
        rest.to_lowercase()
    } else {
        rest.to_uppercase()
    };
    if let Some(degree) = table(is_major).get(flipped.as_str()) {
        debug!("Resolved `{}` as `{}` to degree {}", symbol, flipped, degree);
        return *degree;
    }

    let bare = DECORATION_RE.replace_all(rest, "");
    if let Some(degree) = numeral_to_index(&bare) {
        debug!("Resolved `{}` as bare numeral `{}` to degree {}", symbol, bare, degree);
        return degree;
    }

    warn!("Couldn't resolve roman numeral `{}`, using the tonic", symbol);
    0
}

/// Triad quality implied by a symbol's own notation: diminished marks,
/// then the case of its roman letters. `None` if the symbol carries
/// no roman letters or mixes cases.
pub fn symbol_quality(symbol: &str) -> Option<Quality> {
    let body = symbol.trim_start_matches(|c: char| c == 'b' || c == '#');
    let letters: String = body.chars()
        .take_while(|&c| matches!(c, 'I' | 'V' | 'i' | 'v'))
        .collect();
    if letters.is_empty() {
        return None;
    }
    let decoration = &body[letters.len()..];
    if decoration.starts_with(|c: char| matches!(c, '°' | 'ø' | 'o')) || decoration.starts_with("dim") {
        Some(Quality::Diminished)
    } else if letters.chars().all(|c| c.is_lowercase()) {
        Some(Quality::Minor)
    } else if letters.chars().all(|c| c.is_uppercase()) {
        Some(Quality::Major)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_direct_lookup() {
        assert_eq!(resolve("I", true), 0);
        assert_eq!(resolve("ii", true), 1);
        assert_eq!(resolve("V", true), 4);
        assert_eq!(resolve("vii°", true), 6);
        assert_eq!(resolve("V7", true), 4);
        assert_eq!(resolve("ii°", false), 1);
        assert_eq!(resolve("III", false), 2);
        assert_eq!(resolve("VII", false), 6);
    }

    #[test]
    fn test_borrowed_keep_degree() {
        assert_eq!(resolve("bVII", true), 6);
        assert_eq!(resolve("bIII", true), 2);
        assert_eq!(resolve("bVI", false), 5);
        assert_eq!(resolve("bI", true), 0);
    }

    #[test]
    fn test_strip_flat() {
        // Not in the borrowed table, resolved without its flat
        assert_eq!(resolve("biv", false), 3);
        assert_eq!(resolve("bbVI", true), 5);
        assert_eq!(resolve("bvi7", true), 5);
        assert_eq!(resolve("bbbV", false), 4);
    }

    #[test]
    fn test_long_flat_run() {
        let flats = "b".repeat(200_000);
        assert_eq!(resolve(&flats, true), 0);
        assert_eq!(resolve(&format!("{}vi", flats), true), 5);
    }

    #[test]
    fn test_case_flip() {
        assert_eq!(resolve("VI", true), 5);
        assert_eq!(resolve("III", true), 2);
        assert_eq!(resolve("vi", false), 5);
    }

    #[test]
    fn test_bare_numeral() {
        assert_eq!(resolve("IVM7", true), 3);
        assert_eq!(resolve("#iv", true), 3);
        assert_eq!(resolve("VIImin", false), 6);
        assert_eq!(resolve("iiø7", true), 1);
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(resolve("", true), 0);
        assert_eq!(resolve("X", false), 0);
        assert_eq!(resolve("b", true), 0);
        assert_eq!(resolve("🎸", true), 0);
    }

    #[test]
    fn test_symbol_quality() {
        assert_eq!(symbol_quality("V"), Some(Quality::Major));
        assert_eq!(symbol_quality("vi"), Some(Quality::Minor));
        assert_eq!(symbol_quality("vii°"), Some(Quality::Diminished));
        assert_eq!(symbol_quality("iio"), Some(Quality::Diminished));
        assert_eq!(symbol_quality("bVII"), Some(Quality::Major));
        assert_eq!(symbol_quality("ii7"), Some(Quality::Minor));
        assert_eq!(symbol_quality("Iv"), None);
        assert_eq!(symbol_quality("7"), None);
        assert_eq!(symbol_quality(""), None);
    }
}
