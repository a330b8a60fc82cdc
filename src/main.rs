use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use anyhow::{anyhow, Result};
use log::info;
use handchord::core::{key_names, ConcreteChord};
use handchord::grid::{build_borrowed, build_grid, build_sevenths, GridEntry};
use handchord::progression::{build_progression, Catalog, Genre};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Pattern catalog; defaults to ~/.config/handchord/patterns.yaml
    /// and falls back to the built-in catalog
    #[clap(short, long, value_hint = ValueHint::FilePath)]
    patterns: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List key names
    Keys,

    /// Show the chord grid for a key
    Grid { key: String },

    /// Show the diatonic sevenths for a key
    Sevenths { key: String },

    /// Show the borrowed chords for a key
    Borrowed { key: String },

    /// Resolve an eight-step pattern from a grid cell
    Progression {
        key: String,
        cell: usize,

        /// Catalog pattern id
        #[clap(long, conflicts_with = "roman")]
        pattern: Option<String>,

        /// Space-separated roman numerals
        #[clap(long)]
        roman: Option<String>,
    },

    /// Show the pitches of a chord name
    Pitches {
        chord: String,

        #[clap(short, long, default_value = "4")]
        octave: i32,
    },

    /// List catalog patterns
    Patterns {
        #[clap(short, long)]
        genre: Option<Genre>,
    },
}

fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = dirs::config_dir().map(|d| d.join("handchord/patterns.yaml"));
            match default {
                Some(p) if p.exists() => p,
                _ => {
                    info!("Using the built-in pattern catalog");
                    return Ok(Catalog::builtin().clone());
                }
            }
        }
    };
    Ok(Catalog::load(&path)?)
}

/// Split a space-separated pattern into its symbols.
fn parse_roman(roman: &str) -> Result<Vec<String>> {
    let symbols: Vec<String> = roman.split_whitespace().map(String::from).collect();
    if symbols.is_empty() {
        return Err(anyhow!("Empty pattern, expected roman numerals"));
    }
    Ok(symbols)
}

fn print_entries(entries: &[GridEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(anyhow!("Unknown key"));
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{}\t{}\t{}", i, entry.roman, entry.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Keys => {
            for name in key_names() {
                println!("{}", name);
            }
        }
        Command::Grid { key } => print_entries(&build_grid(&key))?,
        Command::Sevenths { key } => print_entries(&build_sevenths(&key))?,
        Command::Borrowed { key } => print_entries(&build_borrowed(&key))?,
        Command::Progression { key, cell, pattern, roman } => {
            let symbols: Vec<String> = match (pattern, roman) {
                (Some(id), _) => {
                    let catalog = load_catalog(args.patterns)?;
                    catalog.find_chord_pattern(&id)
                        .ok_or_else(|| anyhow!("No pattern `{}`", id))?
                        .roman.clone()
                }
                (None, Some(roman)) => parse_roman(&roman)?,
                (None, None) => return Err(anyhow!("Pass --pattern or --roman")),
            };
            let chords = build_progression(cell, &key, &symbols);
            if chords.is_empty() {
                return Err(anyhow!("Unknown key `{}`", key));
            }
            println!("{}", chords.join(" "));
        }
        Command::Pitches { chord, octave } => {
            let chord = ConcreteChord::parse(&chord);
            let pitches: Vec<String> = chord.pitches().iter().map(|p| p.to_string()).collect();
            println!("{}\t{}\t{}", chord, pitches.join(" "), chord.describe_notes(octave).join(" "));
        }
        Command::Patterns { genre } => {
            let catalog = load_catalog(args.patterns)?;
            let genres = match genre {
                Some(g) => vec![g],
                None => catalog.genres(),
            };
            for genre in genres {
                for p in catalog.chord_patterns(genre) {
                    println!("{}\tchords\t{}\t{}\t{}", genre, p.id, p.name, p.roman.join(" "));
                }
                for r in catalog.rhythm_patterns(genre) {
                    println!("{}\trhythm\t{}\t{}\t{:?}", genre, r.id, r.name, r.pattern);
                }
            }
        }
    }

    Ok(())
}
