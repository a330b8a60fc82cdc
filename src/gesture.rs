//! Boundary with the hand-tracking collaborator: per-frame landmarks and
//! classifier labels come in, a gesture and a grid cell come out.

use serde::Deserialize;
use std::fmt;
use crate::grid::GRID_SIZE;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_KNUCKLE: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const PINKY_KNUCKLE: usize = 17;

/// Landmarks needed before pinch and back-of-hand are derived.
pub const MIN_LANDMARKS: usize = 18;

/// Normalized thumb-to-index distance below which the hand pinches.
pub const PINCH_DISTANCE: f32 = 0.05;

const GRID_COLUMNS: usize = 3;

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Landmark {
        Landmark { x, y, z: None }
    }

    /// Distance in the image plane.
    pub fn distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Handedness {
    Left,
    Right,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Gesture {
    ClosedFist,
    OpenPalm,
    None,
    BackOfHand,
    Pinch,
    Other(String),
}

impl Gesture {
    /// Map a classifier label; unknown labels are kept as `Other`.
    pub fn from_label(label: &str) -> Gesture {
        match label {
            "Closed_Fist" => Gesture::ClosedFist,
            "Open_Palm" => Gesture::OpenPalm,
            "None" | "" => Gesture::None,
            "Back_Of_Hand" => Gesture::BackOfHand,
            "Pinch" => Gesture::Pinch,
            other => Gesture::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Gesture::ClosedFist => "Closed_Fist",
            Gesture::OpenPalm => "Open_Palm",
            Gesture::None => "None",
            Gesture::BackOfHand => "Back_Of_Hand",
            Gesture::Pinch => "Pinch",
            Gesture::Other(label) => label,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One recognized hand in one video frame.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HandFrame {
    /// Classifier label, e.g. "Open_Palm"
    pub gesture: String,
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
    #[serde(default)]
    pub confidence: f32,
}

impl HandFrame {
    /// Wrist position, used to pick a grid cell.
    pub fn position(&self) -> Option<&Landmark> {
        self.landmarks.get(WRIST)
    }
}

pub fn is_pinch(landmarks: &[Landmark]) -> bool {
    match (landmarks.get(THUMB_TIP), landmarks.get(INDEX_TIP)) {
        (Some(thumb), Some(index)) => thumb.distance(index) < PINCH_DISTANCE,
        _ => false,
    }
}

/// Whether the back of the hand faces the camera, from the winding of
/// wrist, index knuckle and pinky knuckle in image coordinates.
pub fn is_back_of_hand(landmarks: &[Landmark], handedness: Handedness) -> bool {
    let (wrist, index, pinky) = match (
        landmarks.get(WRIST),
        landmarks.get(INDEX_KNUCKLE),
        landmarks.get(PINKY_KNUCKLE),
    ) {
        (Some(w), Some(i), Some(p)) => (w, i, p),
        _ => return false,
    };
    let (ax, ay) = (index.x - wrist.x, index.y - wrist.y);
    let (bx, by) = (pinky.x - wrist.x, pinky.y - wrist.y);
    let cross = ax * by - ay * bx;
    match handedness {
        Handedness::Right => cross > 0.,
        Handedness::Left => cross < 0.,
    }
}

/// The gesture for a frame. Pinch wins over back-of-hand, and both
/// need a full landmark set; otherwise the classifier label is used.
pub fn derive_gesture(frame: &HandFrame) -> Gesture {
    if frame.landmarks.len() >= MIN_LANDMARKS {
        if is_pinch(&frame.landmarks) {
            return Gesture::Pinch;
        }
        if is_back_of_hand(&frame.landmarks, frame.handedness) {
            return Gesture::BackOfHand;
        }
    }
    Gesture::from_label(&frame.gesture)
}

/// Grid cell under a normalized position, row-major from the top left.
pub fn cell_for_position(x: f32, y: f32) -> usize {
    let axis = |v: f32| {
        let idx = (v.clamp(0., 1.) * GRID_COLUMNS as f32).floor() as usize;
        idx.min(GRID_COLUMNS - 1)
    };
    (axis(y) * GRID_COLUMNS + axis(x)).min(GRID_SIZE - 1)
}

#[cfg(test)]
mod test {
    use super::*;

    /// A right hand, palm to the camera, fingers up and spread.
    fn open_hand() -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); 21];
        landmarks[WRIST] = Landmark::new(0.5, 0.9);
        landmarks[THUMB_TIP] = Landmark::new(0.7, 0.6);
        landmarks[INDEX_KNUCKLE] = Landmark::new(0.55, 0.6);
        landmarks[INDEX_TIP] = Landmark::new(0.56, 0.3);
        landmarks[PINKY_KNUCKLE] = Landmark::new(0.45, 0.62);
        landmarks
    }

    fn frame(landmarks: Vec<Landmark>, handedness: Handedness) -> HandFrame {
        HandFrame {
            gesture: "Open_Palm".to_string(),
            landmarks,
            handedness,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Gesture::from_label("Closed_Fist"), Gesture::ClosedFist);
        assert_eq!(Gesture::from_label("None"), Gesture::None);
        assert_eq!(Gesture::from_label("Thumb_Up"), Gesture::Other("Thumb_Up".to_string()));
        assert_eq!(Gesture::Pinch.to_string(), "Pinch");
    }

    #[test]
    fn test_palm() {
        let f = frame(open_hand(), Handedness::Right);
        assert_eq!(derive_gesture(&f), Gesture::OpenPalm);
    }

    #[test]
    fn test_back_of_hand() {
        // Mirroring the knuckles flips the winding
        let mut landmarks = open_hand();
        landmarks[INDEX_KNUCKLE] = Landmark::new(0.45, 0.6);
        landmarks[PINKY_KNUCKLE] = Landmark::new(0.55, 0.62);
        let f = frame(landmarks.clone(), Handedness::Right);
        assert_eq!(derive_gesture(&f), Gesture::BackOfHand);

        // The same winding on a left hand is its palm
        let f = frame(landmarks, Handedness::Left);
        assert_eq!(derive_gesture(&f), Gesture::OpenPalm);
    }

    #[test]
    fn test_pinch() {
        let mut landmarks = open_hand();
        landmarks[THUMB_TIP] = Landmark::new(0.57, 0.31);
        let f = frame(landmarks, Handedness::Right);
        assert_eq!(derive_gesture(&f), Gesture::Pinch);
    }

    #[test]
    fn test_too_few_landmarks() {
        let mut landmarks = open_hand();
        landmarks[THUMB_TIP] = landmarks[INDEX_TIP];
        landmarks.truncate(10);
        let f = frame(landmarks, Handedness::Right);
        assert_eq!(derive_gesture(&f), Gesture::OpenPalm);
        assert!(!is_back_of_hand(&f.landmarks, Handedness::Right));
    }

    #[test]
    fn test_cell_for_position() {
        assert_eq!(cell_for_position(0., 0.), 0);
        assert_eq!(cell_for_position(0.5, 0.), 1);
        assert_eq!(cell_for_position(0.99, 0.5), 5);
        assert_eq!(cell_for_position(1., 1.), 8);
        assert_eq!(cell_for_position(-3., 7.), 6);
        assert_eq!(cell_for_position(f32::NAN, 0.5), 3);
    }
}
