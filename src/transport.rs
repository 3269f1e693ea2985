//! # Transport
//!
//! Play / pause / replay control around a [`PlaybackCursor`].
//!
//! The host calls [`Player::tick`] at the configured rate (10 Hz by
//! default). While playing, each tick advances `now` by one interval and
//! runs one windowing pass; while paused, ticks do nothing.
//!
//! ## Example
//! ```rust
//! use vpiano::config::PlayerConfig;
//! use vpiano::sink::AudioStyle;
//! use vpiano::transport::Player;
//!
//! let config = PlayerConfig { autoplay: true, ..PlayerConfig::default() };
//! let mut player = Player::new(config).unwrap();
//! player.load(vpiano::parse("tyu").unwrap());
//! player.play();
//!
//! let mut played: Vec<(u8, AudioStyle)> = Vec::new();
//! while !player.is_finished() {
//!     player.tick(&mut played);
//! }
//! assert_eq!(played.len(), 3);
//! ```

use std::sync::Arc;

use crate::config::PlayerConfig;
use crate::cursor::{active, PlaybackCursor, Trigger};
use crate::error::Result;
use crate::event::{total_duration, NoteEvent};
use crate::sink::{AudioStyle, NoteSink};

/// One playback session
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    notes: Arc<[NoteEvent]>,
    ticks: u64,
    running: bool,
    cursor: PlaybackCursor,
}

impl Player {
    /// Player with an empty score. Fails with `ConfigError` for a config
    /// that does not pass [`PlayerConfig::validate`].
    pub fn new(config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        let cursor = PlaybackCursor::new(config.window);
        Ok(Self {
            config,
            notes: Arc::from(Vec::new()),
            ticks: 0,
            running: false,
            cursor,
        })
    }

    /// Swap in a new score. `now` is kept; cursor memory is not.
    pub fn load(&mut self, notes: impl Into<Arc<[NoteEvent]>>) {
        self.notes = notes.into();
        self.cursor.reset();
        log::info!(
            "loaded {} notes ({:.1}s)",
            self.notes.len(),
            total_duration(&self.notes)
        );
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    /// Stop ticking; `now` is kept
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop and rewind to the beginning
    pub fn replay(&mut self) {
        self.running = false;
        self.ticks = 0;
        self.cursor.reset();
    }

    pub fn is_playing(&self) -> bool {
        self.running
    }

    /// Advance one tick. Returns the MIDI numbers sent to `sink`.
    pub fn tick(&mut self, sink: &mut dyn NoteSink) -> Vec<u8> {
        if !self.running {
            return Vec::new();
        }
        let trigger = self.trigger();
        let mut fired: Vec<(u8, AudioStyle)> = Vec::new();

        // Let notes at the current position enter the window before moving on
        if !self.cursor.is_tracking(&self.notes) {
            self.cursor.tick(&self.notes, self.now(), trigger, &mut fired);
        }
        self.ticks += 1;
        self.cursor.tick(&self.notes, self.now(), trigger, &mut fired);

        for &(midi, style) in &fired {
            sink.play(midi, style);
        }
        fired.into_iter().map(|(midi, _)| midi).collect()
    }

    fn trigger(&self) -> Trigger {
        Trigger {
            autoplay: self.config.autoplay,
            muted: self.config.mute,
            style: self.config.audio_style,
        }
    }

    /// Seconds of playback time elapsed
    pub fn now(&self) -> f64 {
        self.ticks as f64 / f64::from(self.config.fps)
    }

    pub fn notes(&self) -> &Arc<[NoteEvent]> {
        &self.notes
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.config.autoplay = autoplay;
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.config.mute = mute;
    }

    /// Events currently visible above the keyboard
    pub fn active(&self) -> Vec<&NoteEvent> {
        active(&self.notes, self.now(), self.config.window)
    }

    /// Score length in seconds
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.notes)
    }

    /// Whole-percent progress through the score, 0 to 100
    pub fn progress(&self) -> u8 {
        let total = self.total_duration();
        if total <= 0.0 {
            return 0;
        }
        (self.now() / total * 100.0).floor().clamp(0.0, 100.0) as u8
    }

    pub fn is_finished(&self) -> bool {
        self.now() >= self.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PianoError;
    use pretty_assertions::assert_eq;

    fn autoplay() -> PlayerConfig {
        PlayerConfig {
            autoplay: true,
            ..PlayerConfig::default()
        }
    }

    fn run_to_end(player: &mut Player, sink: &mut Vec<(u8, AudioStyle)>) {
        for _ in 0..1000 {
            player.tick(sink);
        }
    }

    #[test]
    fn test_stopped_player_does_not_advance() {
        let mut player = Player::new(autoplay()).unwrap();
        player.load(crate::parse("tyu").unwrap());
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        assert!(player.tick(&mut sink).is_empty());
        assert_eq!(player.now(), 0.0);
    }

    #[test]
    fn test_plays_every_note_once_in_order() {
        let mut player = Player::new(autoplay()).unwrap();
        player.load(crate::parse("0 [24] 5").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        run_to_end(&mut player, &mut sink);
        let midis: Vec<u8> = sink.iter().map(|(m, _)| *m).collect();
        assert_eq!(midis, vec![60, 62, 64, 65]);
    }

    #[test]
    fn test_note_starting_at_zero_is_played() {
        let mut player = Player::new(autoplay()).unwrap();
        player.load(crate::parse("0").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        assert_eq!(player.tick(&mut sink), vec![60]);
        assert_eq!(sink, vec![(60, AudioStyle::Full)]);
    }

    #[test]
    fn test_replay_plays_again() {
        let mut player = Player::new(autoplay()).unwrap();
        player.load(crate::parse("00").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        run_to_end(&mut player, &mut sink);
        player.replay();
        player.play();
        run_to_end(&mut player, &mut sink);
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_pause_keeps_now_and_replay_resets() {
        let mut player = Player::new(autoplay()).unwrap();
        player.load(crate::parse("024579").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        for _ in 0..5 {
            player.tick(&mut sink);
        }
        player.pause();
        let paused_at = player.now();
        assert_eq!(paused_at, 0.5);
        player.tick(&mut sink);
        assert_eq!(player.now(), paused_at);

        player.replay();
        assert_eq!(player.now(), 0.0);
        assert!(!player.is_playing());
    }

    #[test]
    fn test_mute_suppresses_playback() {
        let mut player = Player::new(PlayerConfig {
            mute: true,
            ..autoplay()
        }).unwrap();
        player.load(crate::parse("0 245").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        run_to_end(&mut player, &mut sink);
        assert!(sink.is_empty());
        assert!(player.is_finished());
    }

    #[test]
    fn test_load_mid_playback_does_not_fire_old_notes() {
        let mut player = Player::new(autoplay()).unwrap();
        player.load(crate::parse("0000 2222").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        player.tick(&mut sink);
        player.tick(&mut sink);
        let before = sink.len();

        player.load(vec![NoteEvent::new(72, 100.0, 100.5)]);
        for _ in 0..30 {
            player.tick(&mut sink);
        }
        assert_eq!(sink.len(), before);
    }

    #[test]
    fn test_progress() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        assert_eq!(player.progress(), 0);
        player.load(crate::parse("024579").unwrap()); // 3 seconds
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        for _ in 0..15 {
            player.tick(&mut sink);
        }
        assert_eq!(player.progress(), 50);
        for _ in 0..100 {
            player.tick(&mut sink);
        }
        assert_eq!(player.progress(), 100);
        assert!(player.is_finished());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let zero_fps = PlayerConfig {
            fps: 0,
            ..PlayerConfig::default()
        };
        assert!(matches!(Player::new(zero_fps), Err(PianoError::ConfigError(_))));

        let no_window = PlayerConfig {
            window: f64::NAN,
            ..PlayerConfig::default()
        };
        assert!(matches!(Player::new(no_window), Err(PianoError::ConfigError(_))));
    }

    #[test]
    fn test_active_window() {
        let mut player = Player::new(PlayerConfig {
            window: 1.0,
            ..PlayerConfig::default()
        }).unwrap();
        player.load(crate::parse("024579").unwrap());
        player.play();
        let mut sink: Vec<(u8, AudioStyle)> = Vec::new();
        player.tick(&mut sink);
        // now = 0.1, window [0.1, 1.1] holds only the second note (0.5..1.0)
        let codes: Vec<u8> = player.active().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![62]);
    }
}
