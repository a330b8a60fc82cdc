mod key;
mod note;
mod chord;
mod interval;
mod numeral;

pub use key::{KeySignature, Mode, KEY_SIGNATURES, DEFAULT_KEY, MAJOR, MINOR, lookup, find_key, resolve_key_name, key_names};
pub use note::{Note, NoteParseError, note_to_semitone, semitone_to_note, note_name, split_root, flatten, flatten_for_grid};
pub use chord::{ConcreteChord, Quality, pitches_for};
pub use interval::Interval;
pub use numeral::{NUMERALS, resolve, symbol_quality};
