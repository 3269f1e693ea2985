//! # Layout Engine
//!
//! Visible key windows and their rendering geometry.
//!
//! Widths are percentages of the keyboard container. Horizontal offsets are
//! expressed in multiples of one key width, so a key at offset `x` is drawn
//! at `translateX(x * 100%)`.
//!
//! ## Layouts
//! - `Full` - all 88 keys, A0 to C8 (52 white, 36 black)
//! - `Small` - C2 to C7 inclusive (36 white, 25 black)
//!
//! ## Example
//! ```rust
//! use vpiano::layout::{black_offset_x, key_width, white_keys, Layout};
//!
//! assert_eq!(white_keys(Layout::Full).len(), 52);
//! assert_eq!(key_width(Layout::Small), 100.0 / 36.0);
//! assert_eq!(black_offset_x(0, Layout::Full), 0.5); // A#0
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::keys::{all_keys, find_key, is_black, Key};

/// Gap pattern between black keys inside one 5-black-key group
const BLACK_OFFSETS: [f64; 5] = [5.0, 0.0, 1.0, 3.0, 4.0];

/// First and last key of the `Small` window
const SMALL_RANGE: (&str, &str) = ("C2", "C7");

/// Visible key window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Full,
    Small,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Layout::Full),
            "small" => Ok(Layout::Small),
            other => Err(format!("unknown layout '{}' (expected full or small)", other)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Full => write!(f, "full"),
            Layout::Small => write!(f, "small"),
        }
    }
}

/// Keys visible in a layout, ascending MIDI order
pub fn keys_for(layout: Layout) -> &'static [Key] {
    let keys = all_keys();
    match layout {
        Layout::Full => keys,
        Layout::Small => {
            let (first, last) = SMALL_RANGE;
            match (find_key(first), find_key(last)) {
                (Some(a), Some(b)) => &keys[a..=b],
                _ => keys,
            }
        }
    }
}

pub fn white_keys(layout: Layout) -> Vec<&'static Key> {
    keys_for(layout).iter().filter(|k| !k.is_black).collect()
}

pub fn black_keys(layout: Layout) -> Vec<&'static Key> {
    keys_for(layout).iter().filter(|k| k.is_black).collect()
}

/// Width of one key in percent, so the white row spans exactly 100%
pub fn key_width(layout: Layout) -> f64 {
    100.0 / white_keys(layout).len() as f64
}

/// Horizontal offset of the `index`-th black key, in key widths.
///
/// Black keys come in groups of five (2 + 3 per octave). The full keyboard
/// starts with a lone A#0 before its first complete group, which is why its
/// grouping is shifted by one.
pub fn black_offset_x(index: usize, layout: Layout) -> f64 {
    match layout {
        Layout::Full => {
            if index == 0 {
                return 0.5;
            }
            let group = (index - 1) / 5;
            2.5 + 7.0 * group as f64 + BLACK_OFFSETS[index % 5]
        }
        Layout::Small => {
            let group = index / 5;
            0.5 + 7.0 * group as f64 + BLACK_OFFSETS[index % 5]
        }
    }
}

/// Position of a white key within the layout's white row
pub fn white_index(midi: u8, layout: Layout) -> Option<usize> {
    white_keys(layout).iter().position(|k| k.midi == midi)
}

/// Position of a black key within the layout's black row
pub fn black_index(midi: u8, layout: Layout) -> Option<usize> {
    black_keys(layout).iter().position(|k| k.midi == midi)
}

/// Horizontal offset of any key, in key widths.
///
/// `None` when the note is not visible in the layout.
pub fn key_offset_x(midi: u8, layout: Layout) -> Option<f64> {
    if is_black(midi) {
        black_index(midi, layout).map(|i| black_offset_x(i, layout))
    } else {
        white_index(midi, layout).map(|i| i as f64)
    }
}
