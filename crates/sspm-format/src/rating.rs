//! Difficulty rating interface.
//!
//! Rating a map is delegated to a [`DifficultyRater`]. This module only
//! extracts the note stream a rater consumes and provides the
//! performance-point curve applied on top of a star rating.

use crate::Marker;

/// A note reduced to what a difficulty rater needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Note {
    /// Time in milliseconds.
    pub time: u32,
    /// Horizontal grid coordinate.
    pub x: f32,
    /// Vertical grid coordinate.
    pub y: f32,
}

impl Note {
    /// Build a note from a marker whose first field is a position.
    ///
    /// Returns `None` for non-note markers and notes without a position.
    pub fn from_marker(marker: &Marker) -> Option<Self> {
        if !marker.is_note() {
            return None;
        }
        let position = marker.field(0)?.as_position()?;
        Some(Self {
            time: marker.position,
            x: position.x(),
            y: position.y(),
        })
    }
}

/// Extract notes from markers, sorted by time.
pub fn extract_notes(markers: &[Marker]) -> Vec<Note> {
    let mut notes: Vec<Note> = markers.iter().filter_map(Note::from_marker).collect();
    notes.sort_by_key(|n| n.time);
    notes
}

/// Computes a star rating from a time-sorted note stream.
pub trait DifficultyRater {
    /// Star rating for `notes`, which are sorted by time.
    fn rate(&self, notes: &[Note]) -> f64;
}

impl<F> DifficultyRater for F
where
    F: Fn(&[Note]) -> f64,
{
    fn rate(&self, notes: &[Note]) -> f64 {
        self(notes)
    }
}

/// Accuracy easing: `2^(35x - 35)`, pinned to zero at zero accuracy.
fn ease_accuracy(accuracy: f64) -> f64 {
    if accuracy == 0.0 {
        0.0
    } else {
        2f64.powf(35.0 * accuracy - 35.0)
    }
}

/// Performance points awarded for a play at `accuracy` (0.0 to 1.0) on a map
/// rated `star_rating`.
pub fn performance_points(star_rating: f64, accuracy: f64) -> u64 {
    let scaled = star_rating * ease_accuracy(accuracy) * 100.0 / 2.0;
    (scaled.powi(2) / 1000.0).round() as u64
}
