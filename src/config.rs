//! # Player Configuration
//!
//! Settings for a playback session, read from YAML. Every key is optional.
//!
//! ```yaml
//! fps: 10            # ticks per second
//! window: 10         # seconds of music visible above the keyboard
//! autoplay: true     # play notes as they reach the keys
//! mute: false
//! layout: small      # full | small
//! audio-style: full  # full | small
//! sample-root: /free-piano
//! ```
//!
//! ## Example
//! ```rust
//! use vpiano::config::PlayerConfig;
//! use vpiano::layout::Layout;
//!
//! let config = PlayerConfig::from_yaml("layout: small\nautoplay: true").unwrap();
//! assert_eq!(config.layout, Layout::Small);
//! assert_eq!(config.fps, 10);
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PianoError, Result};
use crate::layout::Layout;
use crate::sink::{AudioStyle, DEFAULT_SAMPLE_ROOT};

/// Default tick rate
pub const DEFAULT_FPS: u32 = 10;
/// Default visible window in seconds
pub const DEFAULT_WINDOW: f64 = 10.0;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawPlayerConfig {
    fps: Option<u32>,
    window: Option<f64>,
    autoplay: Option<bool>,
    mute: Option<bool>,
    layout: Option<Layout>,
    audio_style: Option<AudioStyle>,
    sample_root: Option<String>,
}

/// Validated playback settings
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub fps: u32,
    pub window: f64,
    pub autoplay: bool,
    pub mute: bool,
    pub layout: Layout,
    pub audio_style: AudioStyle,
    pub sample_root: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            window: DEFAULT_WINDOW,
            autoplay: false,
            mute: false,
            layout: Layout::Full,
            audio_style: AudioStyle::Full,
            sample_root: DEFAULT_SAMPLE_ROOT.to_string(),
        }
    }
}

impl PlayerConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        let raw: RawPlayerConfig = if content.trim().is_empty() {
            RawPlayerConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| PianoError::ConfigError(e.to_string()))?
        };

        let defaults = Self::default();
        let config = Self {
            fps: raw.fps.unwrap_or(defaults.fps),
            window: raw.window.unwrap_or(defaults.window),
            autoplay: raw.autoplay.unwrap_or(defaults.autoplay),
            mute: raw.mute.unwrap_or(defaults.mute),
            layout: raw.layout.unwrap_or(defaults.layout),
            audio_style: raw.audio_style.unwrap_or(defaults.audio_style),
            sample_root: raw.sample_root.unwrap_or(defaults.sample_root),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PianoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        log::debug!("loaded player config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(PianoError::ConfigError("fps must be greater than 0".to_string()));
        }
        if !(self.window.is_finite() && self.window > 0.0) {
            return Err(PianoError::ConfigError(format!(
                "window must be a positive number of seconds, got {}",
                self.window
            )));
        }
        Ok(())
    }

    /// Seconds of playback time per tick
    pub fn tick_interval(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }
}
