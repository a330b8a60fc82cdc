mod scheduler;

pub use scheduler::VoiceScheduler;
use log::{debug, warn};
use crate::core::{ConcreteChord, DEFAULT_KEY};
use crate::gesture::{Gesture, HandFrame, cell_for_position, derive_gesture};
use crate::grid::{ChordGrid, GridEntry, GRID_DEGREES};
use crate::progression::{ChordPattern, RhythmPattern, build_progression};

/// A chord (or single note) for the audio layer to sound.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub chord: String,

    /// Semitones from C of the reference octave
    pub pitches: Vec<i32>,

    /// Seconds
    pub duration: f32,

    /// Loudness in [0, 1]
    pub velocity: f32,
}

impl PlayRequest {
    pub fn chord(name: &str, duration: f32, velocity: f32) -> PlayRequest {
        PlayRequest {
            chord: name.to_string(),
            pitches: ConcreteChord::parse(name).pitches(),
            duration,
            velocity,
        }
    }
}

fn to_ms(seconds: f32) -> u64 {
    (seconds.max(0.) * 1000.).round() as u64
}

/// Live play state: the current key's chord tables and
/// which grid voices are still sounding.
pub struct Performance {
    grid: ChordGrid,

    /// Seconds per chord
    pub note_duration: f32,

    /// Seconds per arpeggio step
    pub arp_step: f32,

    pub velocity: f32,
    voices: VoiceScheduler,
}

impl Performance {
    /// Start in a key, or C Major if the key is unknown.
    pub fn new(key_name: &str) -> Option<Performance> {
        let grid = ChordGrid::for_key(key_name)
            .or_else(|| ChordGrid::for_key(DEFAULT_KEY))?;
        Some(Performance {
            grid,
            note_duration: 1.,
            arp_step: 0.125,
            velocity: 0.8,
            voices: VoiceScheduler::new(),
        })
    }

    pub fn key_name(&self) -> &'static str {
        self.grid.key.name
    }

    pub fn grid(&self) -> &[GridEntry] {
        &self.grid.triads
    }

    pub fn chord_grid(&self) -> &ChordGrid {
        &self.grid
    }

    /// Rebuild the grid for a new key. An unknown key keeps the
    /// current one and returns false.
    pub fn set_key(&mut self, key_name: &str) -> bool {
        match ChordGrid::for_key(key_name) {
            Some(grid) => {
                debug!("Key changed to {}", grid.key.name);
                self.grid = grid;
                self.voices.clear();
                true
            }
            None => false,
        }
    }

    fn claim(&mut self, cell: usize, now_ms: u64, duration: f32) -> bool {
        self.voices.try_claim(cell, now_ms, to_ms(duration))
    }

    /// Play the chord in a grid cell unless that cell is still sounding.
    pub fn trigger_cell(&mut self, cell: usize, now_ms: u64) -> Option<PlayRequest> {
        let name = match self.grid.entry(cell) {
            Some(entry) => entry.name.clone(),
            None => {
                warn!("No chord in grid cell {}", cell);
                return None;
            }
        };
        if !self.claim(cell, now_ms, self.note_duration) {
            return None;
        }
        Some(PlayRequest::chord(&name, self.note_duration, self.velocity))
    }

    /// Play the diatonic seventh for a grid cell's degree.
    pub fn trigger_seventh(&mut self, cell: usize, now_ms: u64) -> Option<PlayRequest> {
        let degree = *GRID_DEGREES.get(cell)?;
        let name = self.grid.sevenths.get(degree)?.name.clone();
        if !self.claim(cell, now_ms, self.note_duration) {
            return None;
        }
        Some(PlayRequest::chord(&name, self.note_duration, self.velocity))
    }

    /// Arpeggiate a grid cell's chord, upward one pitch per step.
    pub fn trigger_arpeggio(&mut self, cell: usize, now_ms: u64) -> Vec<PlayRequest> {
        let name = match self.grid.entry(cell) {
            Some(entry) => entry.name.clone(),
            None => return vec![],
        };
        let requests = self.arpeggiate(&name);
        let total: f32 = requests.iter().map(|r| r.duration).sum();
        if !self.claim(cell, now_ms, total) {
            return vec![];
        }
        requests
    }

    /// Split a chord into single-pitch requests.
    pub fn arpeggiate(&self, chord_name: &str) -> Vec<PlayRequest> {
        ConcreteChord::parse(chord_name).pitches().into_iter()
            .map(|pitch| PlayRequest {
                chord: chord_name.to_string(),
                pitches: vec![pitch],
                duration: self.arp_step,
                velocity: self.velocity,
            })
            .collect()
    }

    /// Play an eight-step genre pattern from a grid cell, timed
    /// and weighted by a rhythm pattern.
    pub fn play_for_me(&self, cell: usize, pattern: &ChordPattern, rhythm: &RhythmPattern) -> Vec<PlayRequest> {
        build_progression(cell, self.key_name(), &pattern.roman).iter()
            .zip(rhythm.pattern.iter().zip(&rhythm.velocities))
            .map(|(name, (mult, vel))| {
                PlayRequest::chord(name, self.note_duration * mult, *vel)
            })
            .collect()
    }

    /// React to one tracked hand: an open palm plays the chord under
    /// the wrist, the back of the hand its seventh, a pinch an arpeggio,
    /// and a closed fist silences every voice.
    pub fn handle_frame(&mut self, frame: &HandFrame, now_ms: u64) -> Vec<PlayRequest> {
        let gesture = derive_gesture(frame);
        let cell = match frame.position() {
            Some(wrist) => cell_for_position(wrist.x, wrist.y),
            None => return vec![],
        };
        match gesture {
            Gesture::OpenPalm => self.trigger_cell(cell, now_ms).into_iter().collect(),
            Gesture::BackOfHand => self.trigger_seventh(cell, now_ms).into_iter().collect(),
            Gesture::Pinch => self.trigger_arpeggio(cell, now_ms),
            Gesture::ClosedFist => {
                self.voices.clear();
                vec![]
            }
            Gesture::None | Gesture::Other(_) => vec![],
        }
    }

    /// Voices still sounding at `now_ms`.
    pub fn active_voices(&self, now_ms: u64) -> Vec<usize> {
        self.voices.active(now_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gesture::{Handedness, Landmark};
    use crate::progression::Catalog;

    #[test]
    fn test_trigger_cell() {
        let mut perf = Performance::new("C Major").unwrap();
        let req = perf.trigger_cell(5, 0).unwrap();
        assert_eq!(req.chord, "Amin");
        assert_eq!(req.pitches, vec![9, 12, 16]);
        assert_eq!(req.duration, 1.);

        // Still sounding
        assert!(perf.trigger_cell(5, 500).is_none());
        // Other cells are free
        assert!(perf.trigger_cell(4, 500).is_some());
        // Released after the note duration
        assert!(perf.trigger_cell(5, 1000).is_some());

        assert!(perf.trigger_cell(9, 2000).is_none());
    }

    #[test]
    fn test_set_key() {
        let mut perf = Performance::new("Nowhere").unwrap();
        assert_eq!(perf.key_name(), "C Major");

        perf.trigger_cell(0, 0);
        assert!(perf.set_key("E Minor"));
        assert_eq!(perf.grid()[0].name, "Emin");
        assert!(perf.active_voices(10).is_empty());

        assert!(!perf.set_key("e minor"));
        assert_eq!(perf.key_name(), "E Minor");
    }

    #[test]
    fn test_seventh() {
        let mut perf = Performance::new("C Major").unwrap();
        assert_eq!(perf.trigger_seventh(8, 0).unwrap().chord, "G7");
        assert_eq!(perf.trigger_seventh(1, 0).unwrap().pitches, vec![2, 5, 9, 12]);
    }

    #[test]
    fn test_arpeggio() {
        let mut perf = Performance::new("C Major").unwrap();
        let notes = perf.trigger_arpeggio(0, 0);
        let pitches: Vec<i32> = notes.iter().flat_map(|r| r.pitches.clone()).collect();
        assert_eq!(pitches, vec![0, 4, 7]);
        assert!(notes.iter().all(|r| r.duration == 0.125));

        // Blocked for the length of the whole arpeggio
        assert!(perf.trigger_arpeggio(0, 300).is_empty());
        assert_eq!(perf.trigger_arpeggio(0, 375).len(), 3);
    }

    #[test]
    fn test_play_for_me() {
        let perf = Performance::new("G Major").unwrap();
        let catalog = Catalog::builtin();
        let pattern = catalog.find_chord_pattern("pop-axis").unwrap();
        let rhythm = catalog.find_rhythm_pattern("pop-push").unwrap();
        let reqs = perf.play_for_me(0, pattern, rhythm);
        assert_eq!(reqs.len(), 8);
        assert_eq!(reqs[0].chord, "Gmaj");
        assert_eq!(reqs[1].chord, "Dmaj");
        assert_eq!(reqs[0].duration, 1.5);
        assert_eq!(reqs[1].velocity, 0.7);
    }

    fn hand(gesture: &str, x: f32, y: f32) -> HandFrame {
        let mut landmarks = vec![Landmark::new(x, y); 21];
        landmarks[0] = Landmark::new(x, y);
        landmarks[4] = Landmark::new(x + 0.2, y - 0.3);
        landmarks[5] = Landmark::new(x + 0.05, y - 0.3);
        landmarks[8] = Landmark::new(x + 0.06, y - 0.6);
        landmarks[17] = Landmark::new(x - 0.05, y - 0.28);
        HandFrame {
            gesture: gesture.to_string(),
            landmarks,
            handedness: Handedness::Right,
            confidence: 0.95,
        }
    }

    #[test]
    fn test_handle_frame() {
        let mut perf = Performance::new("C Major").unwrap();

        // Wrist in the bottom middle cell
        let reqs = perf.handle_frame(&hand("Open_Palm", 0.5, 0.9), 0);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].chord, "Cmaj");
        assert_eq!(perf.active_voices(1), vec![7]);

        assert!(perf.handle_frame(&hand("Closed_Fist", 0.5, 0.9), 10).is_empty());
        assert!(perf.active_voices(11).is_empty());

        assert!(perf.handle_frame(&hand("Thumb_Up", 0.5, 0.9), 20).is_empty());

        let mut empty = hand("Open_Palm", 0.5, 0.5);
        empty.landmarks.clear();
        assert!(perf.handle_frame(&empty, 30).is_empty());
    }

    #[test]
    fn test_handle_back_of_hand() {
        let mut perf = Performance::new("C Major").unwrap();

        // Swapping the knuckles turns the right hand around
        let mut back = hand("Open_Palm", 0.5, 0.9);
        back.landmarks[5] = Landmark::new(0.45, 0.6);
        back.landmarks[17] = Landmark::new(0.55, 0.62);
        assert_eq!(derive_gesture(&back), Gesture::BackOfHand);

        let reqs = perf.handle_frame(&back, 0);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].chord, "Cmaj7");
        assert_eq!(perf.active_voices(1), vec![7]);
    }

    #[test]
    fn test_handle_pinch() {
        let mut perf = Performance::new("C Major").unwrap();

        // Thumb tip on the index tip, wrist in the top middle cell
        let mut pinch = hand("Open_Palm", 0.5, 0.1);
        pinch.landmarks[4] = pinch.landmarks[8];
        assert_eq!(derive_gesture(&pinch), Gesture::Pinch);

        let reqs = perf.handle_frame(&pinch, 0);
        let pitches: Vec<i32> = reqs.iter().flat_map(|r| r.pitches.clone()).collect();
        assert_eq!(pitches, vec![2, 5, 9]);
        assert!(reqs.iter().all(|r| r.chord == "Dmin"));
        assert_eq!(perf.active_voices(1), vec![1]);
    }
}
