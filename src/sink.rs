//! Playback sink boundary.
//!
//! The engine never produces sound itself. It hands MIDI numbers to a
//! [`NoteSink`] and moves on; the sink may start audio asynchronously.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default location of the sample banks
pub const DEFAULT_SAMPLE_ROOT: &str = "/free-piano";

/// Which sample bank to play notes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioStyle {
    /// Full-length grand piano samples
    #[default]
    Full,
    /// Short samples
    Small,
}

impl AudioStyle {
    /// Directory holding this style's samples
    pub fn bank(&self) -> &'static str {
        match self {
            AudioStyle::Full => "piano-full",
            AudioStyle::Small => "piano",
        }
    }
}

impl FromStr for AudioStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(AudioStyle::Full),
            "small" => Ok(AudioStyle::Small),
            other => Err(format!("unknown audio style '{}' (expected full or small)", other)),
        }
    }
}

impl fmt::Display for AudioStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioStyle::Full => write!(f, "full"),
            AudioStyle::Small => write!(f, "small"),
        }
    }
}

/// URL of the sample for one note, e.g. `/free-piano/piano-full/60.mp3`
pub fn sample_url(root: &str, midi: u8, style: AudioStyle) -> String {
    format!("{}/{}/{}.mp3", root.trim_end_matches('/'), style.bank(), midi)
}

/// Receiver of "play this note" requests
pub trait NoteSink {
    fn play(&mut self, midi: u8, style: AudioStyle);
}

/// Records every request, in order
impl NoteSink for Vec<(u8, AudioStyle)> {
    fn play(&mut self, midi: u8, style: AudioStyle) {
        self.push((midi, style));
    }
}

/// Sink that logs each note with the sample it would play
#[derive(Debug, Clone)]
pub struct LogSink {
    sample_root: String,
    played: usize,
}

impl LogSink {
    pub fn new(sample_root: impl Into<String>) -> Self {
        Self {
            sample_root: sample_root.into(),
            played: 0,
        }
    }

    /// Number of notes played so far
    pub fn played(&self) -> usize {
        self.played
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_ROOT)
    }
}

impl NoteSink for LogSink {
    fn play(&mut self, midi: u8, style: AudioStyle) {
        self.played += 1;
        log::info!(
            "play {} ({}) -> {}",
            midi,
            crate::keys::note_name(midi),
            sample_url(&self.sample_root, midi, style)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_url() {
        assert_eq!(sample_url("/free-piano", 60, AudioStyle::Full), "/free-piano/piano-full/60.mp3");
        assert_eq!(sample_url("/free-piano/", 21, AudioStyle::Small), "/free-piano/piano/21.mp3");
        assert_eq!(sample_url("", 108, AudioStyle::Small), "/piano/108.mp3");
    }

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        sink.play(60, AudioStyle::Full);
        sink.play(62, AudioStyle::Small);
        assert_eq!(sink, vec![(60, AudioStyle::Full), (62, AudioStyle::Small)]);
    }

    #[test]
    fn test_log_sink_counts() {
        let mut sink = LogSink::default();
        sink.play(60, AudioStyle::Full);
        sink.play(61, AudioStyle::Full);
        assert_eq!(sink.played(), 2);
    }

    #[test]
    fn test_audio_style_from_str() {
        assert_eq!("Full".parse::<AudioStyle>(), Ok(AudioStyle::Full));
        assert_eq!("small".parse::<AudioStyle>(), Ok(AudioStyle::Small));
        assert!("loud".parse::<AudioStyle>().is_err());
    }
}
