//! Chord resolution for gesture-driven performance: keys, roman numeral
//! patterns and grid cells in, chord names and semitone offsets out.

pub mod core;
pub mod gesture;
pub mod grid;
pub mod performance;
pub mod progression;

pub use crate::core::{pitches_for, resolve, flatten, flatten_for_grid, lookup, KeySignature};
pub use crate::grid::{build_grid, GridEntry};
pub use crate::progression::build_progression;
