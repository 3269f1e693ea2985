pub mod config;
pub mod cursor;
pub mod error;
pub mod event;
pub mod html;
pub mod keyboard;
pub mod keymap;
pub mod keys;
pub mod layout;
pub mod parser;
pub mod rain;
pub mod sink;
pub mod transport;

pub use config::PlayerConfig;
pub use cursor::{active, PlaybackCursor, Trigger};
pub use error::*;
pub use event::NoteEvent;
pub use keymap::{char_for, midi_for};
pub use keys::{is_black, note_name, Key};
pub use layout::{black_keys, black_offset_x, key_width, white_keys, Layout};
pub use parser::parse;
pub use sink::{AudioStyle, NoteSink};
pub use transport::Player;

/// Parse the score contained in an HTML page.
/// The page's body text is read as a plain text score.
pub fn parse_html(html: &str) -> Result<Vec<NoteEvent>> {
    let text = html::extract_text(html)?;
    parse(&text)
}
