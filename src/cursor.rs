//! # Playback Cursor
//!
//! Decides which note events are visible at the current playback time and
//! fires each event exactly once when it leaves the visible window.
//!
//! ## Window
//! An event is active while it fits entirely inside `[now, now + duration]`:
//! `start >= now && end <= now + duration`. Events enter from the far end of
//! the window and leave once `now` passes their start, which is the moment
//! they reach the keyboard and should sound.
//!
//! ## Identity
//! Events are compared by their position in the shared sequence, never by
//! value, so two identical notes in a row both fire. The cursor also keeps a
//! handle on the sequence its memory belongs to; ticking against a different
//! sequence drops the memory instead of firing stale events.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use vpiano::cursor::{PlaybackCursor, Trigger};
//! use vpiano::event::NoteEvent;
//! use vpiano::sink::AudioStyle;
//!
//! let notes: Arc<[NoteEvent]> = Arc::from(vec![NoteEvent::new(60, 1.0, 1.5)]);
//! let mut cursor = PlaybackCursor::new(2.0);
//! let mut played: Vec<(u8, AudioStyle)> = Vec::new();
//! let trigger = Trigger { autoplay: true, muted: false, style: AudioStyle::Full };
//!
//! cursor.tick(&notes, 0.0, trigger, &mut played); // note enters the window
//! cursor.tick(&notes, 1.1, trigger, &mut played); // note has reached the keys
//! assert_eq!(played, vec![(60, AudioStyle::Full)]);
//! ```

use std::sync::Arc;

use crate::event::NoteEvent;
use crate::keys::on_keyboard;
use crate::sink::{AudioStyle, NoteSink};

/// True when the event lies entirely inside `[now, now + duration]`
pub fn in_window(event: &NoteEvent, now: f64, duration: f64) -> bool {
    event.start >= now && event.end <= now + duration
}

/// Events currently inside the window, in sequence order
pub fn active(notes: &[NoteEvent], now: f64, duration: f64) -> Vec<&NoteEvent> {
    notes.iter().filter(|e| in_window(e, now, duration)).collect()
}

/// Positions of the events currently inside the window, ascending
pub fn active_indices(notes: &[NoteEvent], now: f64, duration: f64) -> Vec<usize> {
    notes
        .iter()
        .enumerate()
        .filter(|(_, e)| in_window(e, now, duration))
        .map(|(i, _)| i)
        .collect()
}

/// Whether and how events leaving the window are played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub autoplay: bool,
    pub muted: bool,
    pub style: AudioStyle,
}

impl Trigger {
    pub fn fires(&self) -> bool {
        self.autoplay && !self.muted
    }
}

/// Per-session cursor memory
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    duration: f64,
    sequence: Option<Arc<[NoteEvent]>>,
    last_active: Vec<usize>,
}

impl PlaybackCursor {
    /// Cursor with a visible window of `duration` seconds
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            sequence: None,
            last_active: Vec::new(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Events that were active after the last tick
    pub fn last_active(&self) -> &[usize] {
        &self.last_active
    }

    /// True once a tick has run against this exact sequence since the last reset
    pub fn is_tracking(&self, notes: &Arc<[NoteEvent]>) -> bool {
        self.sequence
            .as_ref()
            .map_or(false, |seq| Arc::ptr_eq(seq, notes))
    }

    /// Forget the previous tick; the next tick fires nothing
    pub fn reset(&mut self) {
        self.sequence = None;
        self.last_active.clear();
    }

    /// Run one windowing pass at time `now`.
    ///
    /// Returns the positions of the events that left the window since the
    /// previous tick. Those on the keyboard are sent to `sink` when
    /// `trigger` allows it.
    pub fn tick(
        &mut self,
        notes: &Arc<[NoteEvent]>,
        now: f64,
        trigger: Trigger,
        sink: &mut dyn NoteSink,
    ) -> Vec<usize> {
        if !self.is_tracking(notes) {
            if self.sequence.is_some() {
                log::debug!("note sequence replaced, dropping cursor memory");
            }
            self.last_active.clear();
            self.sequence = Some(Arc::clone(notes));
        }

        let current = active_indices(notes, now, self.duration);
        let exited: Vec<usize> = self
            .last_active
            .iter()
            .copied()
            .filter(|i| current.binary_search(i).is_err())
            .collect();

        if trigger.fires() {
            for &i in &exited {
                let code = notes[i].code;
                if on_keyboard(code) {
                    sink.play(code, trigger.style);
                } else {
                    log::trace!("skipping off-keyboard note {} at {}", code, notes[i].start);
                }
            }
        }

        self.last_active = current;
        exited
    }
}
