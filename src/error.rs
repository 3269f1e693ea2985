//! # Error Types
//!
//! This module defines all error types for the virtual piano engine.
//!
//! Only genuinely malformed input is an error. A character with no keymap
//! entry or a MIDI note outside the 88 keys is ordinary data: it resolves to
//! `None` / `0` and simply does not render.
//!
//! ## Error Types
//! - `MalformedInput` - Unterminated chord bracket, with line and column
//! - `ConfigError` - Invalid YAML player configuration
//! - `EventFormat` - Invalid JSON note event list
//! - `ScoreImport` - HTML score page that cannot be tokenized
//! - `Io` - File could not be read
//!
//! ## Usage
//! ```rust
//! use vpiano::{parse, PianoError};
//!
//! match parse("[ab") {
//!     Ok(events) => println!("{} events", events.len()),
//!     Err(PianoError::MalformedInput { line, column, message }) => {
//!         eprintln!("Malformed score at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PianoError>;

#[derive(Error, Debug)]
pub enum PianoError {
    /// Malformed score text.
    ///
    /// Occurs when a `[` chord bracket has no matching `]` before the end of
    /// the input. Parsing stops at that point.
    ///
    /// # Example
    /// ```
    /// # use vpiano::PianoError;
    /// let err = PianoError::MalformedInput {
    ///     line: 2,
    ///     column: 4,
    ///     message: "unterminated chord".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Malformed input at line 2, column 4: unterminated chord");
    /// ```
    #[error("Malformed input at line {line}, column {column}: {message}")]
    MalformedInput {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid player configuration.
    ///
    /// # Example
    /// ```
    /// # use vpiano::PianoError;
    /// let err = PianoError::ConfigError("fps must be greater than 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: fps must be greater than 0");
    /// ```
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// Note event list handed over by an external decoder is not valid JSON
    /// of the expected shape.
    #[error("Invalid note events: {0}")]
    EventFormat(String),

    /// Score page could not be tokenized.
    #[error("Score import failed: {0}")]
    ScoreImport(String),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
