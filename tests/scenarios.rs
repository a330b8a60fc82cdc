use handchord::core::{KEY_SIGNATURES, Mode, MAJOR, MINOR, note_to_semitone};
use handchord::grid::build_grid;
use handchord::progression::{build_progression, Catalog, Genre};
use handchord::{flatten, pitches_for, resolve};

#[test]
fn key_table_is_complete() {
    for mode in [Mode::Major, Mode::Minor] {
        let keys: Vec<_> = KEY_SIGNATURES.iter().filter(|k| k.mode == mode).collect();
        assert_eq!(keys.len(), 12);

        let mut tonics: Vec<i32> = keys.iter()
            .map(|k| note_to_semitone(k.notes[0]).unwrap())
            .collect();
        tonics.sort();
        tonics.dedup();
        assert_eq!(tonics.len(), 12);

        for key in keys {
            assert_eq!(key.notes[0], key.notes[7]);
            let expected = if mode == Mode::Major { MAJOR } else { MINOR };
            assert_eq!(key.semitones, expected);
        }
    }
}

#[test]
fn c_major_grid() {
    let grid: Vec<(String, &str)> = build_grid("C Major").into_iter()
        .map(|e| (e.name, e.roman))
        .collect();
    let expected = [
        ("Cmaj", "I"), ("Dmin", "ii"), ("Emin", "iii"), ("Fmaj", "IV"), ("Gmaj", "V"),
        ("Amin", "vi"), ("Bdim", "vii°"), ("Cmaj", "I"), ("Gmaj", "V"),
    ];
    assert_eq!(grid.len(), expected.len());
    for ((name, roman), (ex_name, ex_roman)) in grid.iter().zip(expected) {
        assert_eq!(name, ex_name);
        assert_eq!(*roman, ex_roman);
    }
}

#[test]
fn known_numerals() {
    assert_eq!(resolve("V", true), 4);
    assert_eq!(resolve("ii", true), 1);
    assert_eq!(resolve("bVII", true), 6);
    assert_eq!(resolve("vii°", true), 6);
}

#[test]
fn tonic_cell_alias() {
    let pattern = ["I", "V", "vi", "IV", "I", "V", "vi", "IV"];
    assert_eq!(build_progression(7, "C Major", &pattern), build_progression(0, "C Major", &pattern));
}

#[test]
fn chord_pitches() {
    assert_eq!(pitches_for("Cmaj"), vec![0, 4, 7]);
    assert_eq!(pitches_for("Amin7"), vec![9, 12, 16, 19]);
}

#[test]
fn flatten_sharp() {
    assert_eq!(flatten("C#"), "C");
}

#[test]
fn nothing_panics_on_junk() {
    let junk = ["", "b", "#", "°", "7777", "zzz", "bbbbbb", "ñandú", "\u{0}", "Imaj7min°"];
    for s in junk {
        let degree = resolve(s, true);
        assert!(degree <= 6);
        assert!(resolve(s, false) <= 6);
        assert!(!pitches_for(s).is_empty());
        let _ = flatten(s);
        assert!(build_grid(s).is_empty());
        assert!(build_progression(0, s, &["I"; 8]).is_empty());
        assert_eq!(build_progression(3, "D Minor", &[s; 8]).len(), 8);
    }
}

#[test]
fn g_major_from_dominant() {
    let pattern = ["I", "IV", "V", "I", "I", "IV", "V", "I"];
    assert_eq!(
        build_progression(4, "G Major", &pattern),
        vec!["Dmaj", "Gmaj", "Amaj", "Dmaj", "Dmaj", "Gmaj", "Amaj", "Dmaj"]);
}

#[test]
fn every_catalog_pattern_resolves_in_every_key() {
    let catalog = Catalog::builtin();
    for genre in Genre::ALL {
        for pattern in catalog.chord_patterns(genre) {
            for key in KEY_SIGNATURES.iter() {
                for cell in 0..9 {
                    let chords = build_progression(cell, key.name, &pattern.roman);
                    assert_eq!(chords.len(), 8, "{} in {}", pattern.id, key.name);
                    for chord in chords {
                        assert!(pitches_for(&chord).len() >= 3, "{}", chord);
                    }
                }
            }
        }
    }
}
