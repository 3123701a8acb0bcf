//! Save data types for the catalog
//!
//! This module defines the error taxonomy shared by every save/load path and the
//! small enums used to describe save files.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Extension used for every catalog save file
pub const SAVE_FILE_EXTENSION: &str = "txt";

/// Direction a save file was being opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenMode::Read => write!(f, "reading"),
            OpenMode::Write => write!(f, "writing"),
        }
    }
}

/// How a save was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    /// Named save that overwrites `<name>.txt`
    Manual,
    /// Timestamped snapshot that never overwrites an earlier one
    Auto,
}

/// Error types for save/load operations
///
/// Every variant propagates straight out of `save_to_file`/`load_from_file`;
/// nothing is recovered internally.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The destination or source file could not be opened
    #[error("Failed to open {} for {mode}: {source}", .path.display())]
    Open {
        path: PathBuf,
        mode: OpenMode,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing an already-open stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended before a required token was read
    #[error("Missing {field}")]
    MissingField { field: &'static str },

    /// A token was present but could not be converted to the field's type
    #[error("Invalid {field}: '{token}'")]
    InvalidField { field: &'static str, token: String },

    /// A field value cannot be written as a single whitespace-free token
    #[error("Cannot save {field} '{value}': must be a single non-empty token")]
    UnwritableField { field: &'static str, value: String },

    /// The record's type tag matches no registered entity type
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),
}

impl SaveError {
    /// True for the two parse failures (missing or unconvertible field)
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            SaveError::MissingField { .. } | SaveError::InvalidField { .. }
        )
    }
}
