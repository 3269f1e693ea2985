use serde::Serialize;
use wasm_bindgen::prelude::*;

use vpiano::config::PlayerConfig;
use vpiano::keyboard::{self, KeyboardState};
use vpiano::keymap::event_to_midi;
use vpiano::layout::{self, Layout};
use vpiano::rain;
use vpiano::{NoteEvent, PianoError, Player};

#[derive(Serialize)]
struct ScoreError {
    message: String,
    line: Option<usize>,
    column: Option<usize>,
}

impl From<PianoError> for ScoreError {
    fn from(e: PianoError) -> Self {
        match e {
            PianoError::MalformedInput {
                line,
                column,
                message,
            } => ScoreError {
                message,
                line: Some(line),
                column: Some(column),
            },
            other => ScoreError {
                message: other.to_string(),
                line: None,
                column: None,
            },
        }
    }
}

fn js_error(e: PianoError) -> JsValue {
    let error = ScoreError::from(e);
    let json = serde_json::to_string(&error).unwrap_or_else(|_| error.message.clone());
    JsValue::from_str(&json)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn parse_layout(layout: &str) -> Result<Layout, JsValue> {
    layout
        .parse::<Layout>()
        .map_err(|message| js_error(PianoError::ConfigError(message)))
}

/// Parse a text score into note events
#[wasm_bindgen]
pub fn parse_score(source: &str) -> Result<JsValue, JsValue> {
    let events = vpiano::parse(source).map_err(js_error)?;
    to_js(&events)
}

/// Parse the score contained in an HTML page
#[wasm_bindgen]
pub fn parse_html_score(html: &str) -> Result<JsValue, JsValue> {
    let events = vpiano::parse_html(html).map_err(js_error)?;
    to_js(&events)
}

/// Check a text score and return its problems as a JSON array
#[wasm_bindgen]
pub fn lint(source: &str) -> String {
    let errors: Vec<ScoreError> = match vpiano::parse(source) {
        Ok(_) => Vec::new(),
        Err(e) => vec![e.into()],
    };
    serde_json::to_string(&errors).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn white_keys(layout: &str) -> Result<JsValue, JsValue> {
    to_js(&layout::white_keys(parse_layout(layout)?))
}

#[wasm_bindgen]
pub fn black_keys(layout: &str) -> Result<JsValue, JsValue> {
    to_js(&layout::black_keys(parse_layout(layout)?))
}

/// Width of one white key, in percent of the keyboard
#[wasm_bindgen]
pub fn key_width(layout: &str) -> Result<f64, JsValue> {
    Ok(layout::key_width(parse_layout(layout)?))
}

/// Horizontal offset of the `index`-th black key, in key widths
#[wasm_bindgen]
pub fn black_offset_x(index: usize, layout: &str) -> Result<f64, JsValue> {
    Ok(layout::black_offset_x(index, parse_layout(layout)?))
}

/// Keyboard character for a note, if it has one
#[wasm_bindgen]
pub fn char_for(midi: u8) -> Option<String> {
    vpiano::char_for(midi).map(String::from)
}

/// MIDI note for a `KeyboardEvent.key`, 0 unless it is one mapped character
#[wasm_bindgen]
pub fn midi_for(key: &str) -> u8 {
    event_to_midi(key).unwrap_or(0)
}

#[wasm_bindgen]
pub fn is_black(midi: u8) -> bool {
    vpiano::is_black(midi)
}

#[wasm_bindgen]
pub fn note_name(midi: u8) -> String {
    vpiano::note_name(midi)
}

/// Solfege label for the `index`-th white key counted from a C
#[wasm_bindgen]
pub fn solfege(white_index: usize) -> String {
    keyboard::solfege(white_index).to_string()
}

/// Physical keyboard state. Feed it `keydown` / `keyup` events.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmKeyboard {
    state: KeyboardState,
}

#[wasm_bindgen]
impl WasmKeyboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmKeyboard {
        WasmKeyboard::default()
    }

    /// Note to play for this key-down, if it starts a new press
    pub fn key_down(&mut self, key: &str) -> Option<u8> {
        self.state.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.state.key_up(key);
    }

    /// Mark a note held by a pointer press; false if it already was
    pub fn press(&mut self, midi: u8) -> bool {
        self.state.press(midi)
    }

    pub fn release(&mut self, midi: u8) {
        self.state.release(midi);
    }

    pub fn is_pressed(&self, midi: u8) -> bool {
        self.state.is_pressed(midi)
    }

    /// Held notes, ascending
    pub fn pressed(&self) -> Vec<u8> {
        self.state.pressed().collect()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.set_muted(muted);
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted()
    }
}

/// List the embedded score names as a JSON array
#[wasm_bindgen]
pub fn list_scores() -> String {
    serde_json::to_string(&vpiano_scores::list_scores()).unwrap_or_else(|_| "[]".to_string())
}

/// Content of an embedded score
#[wasm_bindgen]
pub fn get_score(name: &str) -> Option<String> {
    vpiano_scores::get_score(name).map(|score| score.content)
}

/// Playback session driven by the page's timer.
///
/// The page owns audio: [`WasmPlayer::tick`] hands back the notes to sound.
#[wasm_bindgen]
pub struct WasmPlayer {
    player: Player,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player from optional YAML settings
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: Option<String>) -> Result<WasmPlayer, JsValue> {
        let config = match config_yaml {
            Some(yaml) => PlayerConfig::from_yaml(&yaml).map_err(js_error)?,
            None => PlayerConfig::default(),
        };
        Ok(WasmPlayer {
            player: Player::new(config).map_err(js_error)?,
        })
    }

    /// Load a text score, replacing the current one
    pub fn load_score(&mut self, source: &str) -> Result<(), JsValue> {
        let events = vpiano::parse(source).map_err(js_error)?;
        self.player.load(events);
        Ok(())
    }

    /// Load note events produced by a MIDI decoder (JSON array)
    pub fn load_events(&mut self, json: &str) -> Result<(), JsValue> {
        let events: Vec<NoteEvent> = vpiano::event::events_from_json(json).map_err(js_error)?;
        self.player.load(events);
        Ok(())
    }

    pub fn play(&mut self) {
        self.player.play();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn replay(&mut self) {
        self.player.replay();
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.player.set_autoplay(autoplay);
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.player.set_mute(mute);
    }

    /// Advance one tick; returns the MIDI notes to sound now
    pub fn tick(&mut self) -> Vec<u8> {
        let mut fired: Vec<(u8, vpiano::AudioStyle)> = Vec::new();
        self.player.tick(&mut fired)
    }

    pub fn now(&self) -> f64 {
        self.player.now()
    }

    pub fn progress(&self) -> u8 {
        self.player.progress()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn is_finished(&self) -> bool {
        self.player.is_finished()
    }

    /// Falling-note sprites for the current position
    pub fn sprites(&self) -> Result<JsValue, JsValue> {
        let config = self.player.config();
        let sprites = rain::sprites(
            self.player.notes(),
            self.player.now(),
            config.window,
            config.layout,
        );
        to_js(&sprites)
    }
}
