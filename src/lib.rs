//! selspeak - speak the current selection
//!
//! Reads text from the desktop clipboard or primary selection (or from the
//! command line) and hands it to an external speech engine such as espeak.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod error;
pub mod platform;
pub mod process;
pub mod speech;

pub use error::{Result, SelspeakError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "selspeak";
