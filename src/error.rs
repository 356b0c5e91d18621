//! Error types for selspeak

use std::io;
use thiserror::Error;

/// Main error type for selspeak
#[derive(Error, Debug)]
pub enum SelspeakError {
    #[error("{0} is not installed or not on PATH")]
    NotInstalled(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("No text found in the selection or clipboard")]
    NoText,

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for selspeak operations
pub type Result<T> = std::result::Result<T, SelspeakError>;

