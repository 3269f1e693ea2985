//! # Key Model
//!
//! Static description of the 88-key piano keyboard.
//!
//! Index `i` of the key table is MIDI note `21 + i`, from A0 (21) to C8 (108).
//! The table is generated once and shared; layouts only ever borrow from it.
//!
//! ## Example
//! ```rust
//! use vpiano::keys::{all_keys, note_name, is_black};
//!
//! assert_eq!(all_keys().len(), 88);
//! assert_eq!(note_name(60), "C4");
//! assert!(is_black(61));
//! ```

use serde::Serialize;
use std::sync::OnceLock;

/// Lowest piano key (A0)
pub const LOWEST_MIDI: u8 = 21;
/// Highest piano key (C8)
pub const HIGHEST_MIDI: u8 = 108;
/// Number of keys on a full piano
pub const KEY_COUNT: usize = 88;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A single piano key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub midi: u8,
    pub name: String,
    pub is_black: bool,
}

impl Key {
    pub fn new(midi: u8) -> Self {
        Self {
            midi,
            name: note_name(midi),
            is_black: is_black(midi),
        }
    }
}

/// Note name for a MIDI number, e.g. 60 -> "C4", 61 -> "C#4".
///
/// Octave is `floor(midi / 12) - 1`. Numbers outside the piano range still
/// get a computed name ("C-1" for 0, "A#9" for 130).
pub fn note_name(midi: u8) -> String {
    let octave = i32::from(midi) / 12 - 1;
    format!("{}{}", NOTE_NAMES[usize::from(midi % 12)], octave)
}

/// True for the five sharps of every octave
pub fn is_black(midi: u8) -> bool {
    NOTE_NAMES[usize::from(midi % 12)].contains('#')
}

/// Inverse of [`note_name`].
///
/// Accepts a letter, an optional `#` and a (possibly negative) octave.
/// Returns `None` for anything `note_name` could not have produced.
pub fn name_to_midi(name: &str) -> Option<u8> {
    let octave_at = name.find(|c: char| c == '-' || c.is_ascii_digit())?;
    let (pitch, octave) = name.split_at(octave_at);
    let semitone = NOTE_NAMES.iter().position(|n| *n == pitch)?;
    let octave: i32 = octave.parse().ok()?;
    let midi = (octave + 1) * 12 + semitone as i32;
    u8::try_from(midi).ok()
}

/// Generate the full 88-key table in ascending MIDI order
pub fn generate_keys() -> Vec<Key> {
    (LOWEST_MIDI..=HIGHEST_MIDI).map(Key::new).collect()
}

/// Shared 88-key table, generated on first use
pub fn all_keys() -> &'static [Key] {
    static KEYS: OnceLock<Vec<Key>> = OnceLock::new();
    KEYS.get_or_init(generate_keys)
}

/// Index of the key with the given name in [`all_keys`]
pub fn find_key(name: &str) -> Option<usize> {
    all_keys().iter().position(|k| k.name == name)
}

/// True if the MIDI number is one of the 88 piano keys
pub fn on_keyboard(midi: u8) -> bool {
    (LOWEST_MIDI..=HIGHEST_MIDI).contains(&midi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keys_covers_piano() {
        let keys = generate_keys();
        assert_eq!(keys.len(), KEY_COUNT);
        assert_eq!(keys[0].midi, 21);
        assert_eq!(keys[0].name, "A0");
        assert_eq!(keys[87].midi, 108);
        assert_eq!(keys[87].name, "C8");
        for pair in keys.windows(2) {
            assert_eq!(pair[1].midi, pair[0].midi + 1);
        }
    }

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(21), "A0");
        assert_eq!(note_name(22), "A#0");
        assert_eq!(note_name(24), "C1");
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(107), "B7");
    }

    #[test]
    fn test_out_of_range_names_do_not_panic() {
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(11), "B-1");
        assert_eq!(note_name(130), "A#9");
        assert_eq!(note_name(255), "D#20");
    }

    #[test]
    fn test_is_black_matches_chromatic_table() {
        // C C# D D# E F F# G G# A A# B
        let pattern = [
            false, true, false, true, false, false, true, false, true, false, true, false,
        ];
        for midi in LOWEST_MIDI..=HIGHEST_MIDI {
            assert_eq!(is_black(midi), pattern[usize::from(midi % 12)], "midi {}", midi);
        }
        assert_eq!(generate_keys().iter().filter(|k| k.is_black).count(), 36);
    }

    #[test]
    fn test_name_round_trip() {
        for midi in LOWEST_MIDI..=HIGHEST_MIDI {
            assert_eq!(name_to_midi(&note_name(midi)), Some(midi));
        }
        assert_eq!(name_to_midi("C-1"), Some(0));
    }

    #[test]
    fn test_name_to_midi_rejects_garbage() {
        assert_eq!(name_to_midi(""), None);
        assert_eq!(name_to_midi("H4"), None);
        assert_eq!(name_to_midi("Db4"), None);
        assert_eq!(name_to_midi("C"), None);
        assert_eq!(name_to_midi("C99"), None);
    }

    #[test]
    fn test_find_key() {
        assert_eq!(find_key("A0"), Some(0));
        assert_eq!(find_key("C2"), Some(15));
        assert_eq!(find_key("C7"), Some(75));
        assert_eq!(find_key("C9"), None);
    }
}
