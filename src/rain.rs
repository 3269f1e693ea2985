//! Falling-note geometry.
//!
//! Places every active note above the keyboard: horizontally over its key,
//! vertically by how far in the future it starts.

use serde::Serialize;

use crate::cursor::active;
use crate::event::NoteEvent;
use crate::keymap::char_for;
use crate::keys::is_black;
use crate::layout::{key_offset_x, Layout};

/// A note drawn in the rain area
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSprite {
    pub midi: u8,
    /// Horizontal offset in key widths
    pub x: f64,
    /// 0.0 at the top of the rain area, 1.0 touching the keyboard
    pub top: f64,
    pub is_black: bool,
    pub label: Option<char>,
}

/// Vertical position of a note at time `now`
pub fn note_top(event: &NoteEvent, now: f64, duration: f64) -> f64 {
    1.0 - (event.start - now) / duration
}

/// Sprites for the notes in the window, skipping those with no visible key
pub fn sprites(notes: &[NoteEvent], now: f64, duration: f64, layout: Layout) -> Vec<NoteSprite> {
    active(notes, now, duration)
        .into_iter()
        .filter_map(|event| {
            let x = key_offset_x(event.code, layout)?;
            Some(NoteSprite {
                midi: event.code,
                x,
                top: note_top(event, now, duration),
                is_black: is_black(event.code),
                label: char_for(event.code),
            })
        })
        .collect()
}
