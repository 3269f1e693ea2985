//! Physical keyboard input state.
//!
//! Tracks which notes are held down so that auto-repeated key-down events
//! do not retrigger a note, and gates input while muted (for example while
//! a text field has focus).

use std::collections::BTreeSet;

use crate::keymap::event_to_midi;

const SOLFEGE: [&str; 7] = ["do", "re", "mi", "fa", "so", "la", "si"];

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: BTreeSet<u8>,
    muted: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down event.
    ///
    /// Returns the note to play on the released-to-pressed transition only.
    pub fn key_down(&mut self, key: &str) -> Option<u8> {
        if self.muted {
            return None;
        }
        let midi = event_to_midi(key)?;
        self.press(midi).then_some(midi)
    }

    pub fn key_up(&mut self, key: &str) {
        if self.muted {
            return;
        }
        if let Some(midi) = event_to_midi(key) {
            self.release(midi);
        }
    }

    /// Mark a note as held (e.g. clicked on screen). False if it already was.
    pub fn press(&mut self, midi: u8) -> bool {
        self.pressed.insert(midi)
    }

    pub fn release(&mut self, midi: u8) {
        self.pressed.remove(&midi);
    }

    pub fn is_pressed(&self, midi: u8) -> bool {
        self.pressed.contains(&midi)
    }

    /// Held notes, ascending
    pub fn pressed(&self) -> impl Iterator<Item = u8> + '_ {
        self.pressed.iter().copied()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Solfege label (C major) for the `index`-th white key counted from a C
pub fn solfege(white_index: usize) -> &'static str {
    SOLFEGE[white_index % SOLFEGE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_plays_once_until_released() {
        let mut kb = KeyboardState::new();
        assert_eq!(kb.key_down("t"), Some(60));
        assert_eq!(kb.key_down("t"), None);
        assert!(kb.is_pressed(60));
        kb.key_up("t");
        assert!(!kb.is_pressed(60));
        assert_eq!(kb.key_down("t"), Some(60));
    }

    #[test]
    fn test_chord_held_together() {
        let mut kb = KeyboardState::new();
        assert_eq!(kb.key_down("u"), Some(64));
        assert_eq!(kb.key_down("t"), Some(60));
        assert_eq!(kb.key_down("o"), Some(67));
        assert_eq!(kb.pressed().collect::<Vec<_>>(), vec![60, 64, 67]);
    }

    #[test]
    fn test_unmapped_keys() {
        let mut kb = KeyboardState::new();
        assert_eq!(kb.key_down("Shift"), None);
        assert_eq!(kb.key_down("~"), None);
        kb.key_up("Enter");
        assert_eq!(kb.pressed().count(), 0);
    }

    #[test]
    fn test_muted_ignores_input() {
        let mut kb = KeyboardState::new();
        kb.set_muted(true);
        assert_eq!(kb.key_down("t"), None);
        assert!(!kb.is_pressed(60));
        kb.set_muted(false);
        assert_eq!(kb.key_down("t"), Some(60));
    }

    #[test]
    fn test_solfege_cycles_every_octave() {
        assert_eq!(solfege(0), "do");
        assert_eq!(solfege(4), "so");
        assert_eq!(solfege(6), "si");
        assert_eq!(solfege(7), "do");
        assert_eq!(solfege(10), "fa");
    }
}
