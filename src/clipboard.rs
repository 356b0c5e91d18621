//! Text acquisition from the desktop
//!
//! Text comes from an explicit argument when one is given. Otherwise an
//! ordered list of sources is tried lazily and the first one that yields
//! non-whitespace text wins:
//!
//! 1. the native clipboard (arboard)
//! 2. the X11 primary selection via `xclip`
//! 3. the X11 clipboard via `xclip`
//! 4. the X11 primary selection via `xsel`

use crate::platform::Session;
use crate::process::{self, CommandRunner};
use crate::{Result, SelspeakError};
use arboard::Clipboard;
use log::{debug, info};
use std::ffi::OsString;

/// Something that can produce text from the desktop
pub trait TextSource {
    /// Human readable name, reported to the user on success
    fn describe(&self) -> &str;

    /// Read the raw text. Errors and empty output are soft failures.
    fn read(&self) -> Result<String>;
}

/// Native clipboard through arboard
pub struct NativeClipboard {
    session: Session,
}

impl NativeClipboard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl TextSource for NativeClipboard {
    fn describe(&self) -> &str {
        "system clipboard"
    }

    fn read(&self) -> Result<String> {
        if !self.session.has_display() {
            return Err(SelspeakError::Clipboard("no display available".to_string()));
        }

        debug!("Getting text from clipboard");

        let mut clipboard = Clipboard::new()
            .map_err(|e| SelspeakError::Clipboard(format!("Failed to open clipboard: {}", e)))?;

        clipboard
            .get_text()
            .map_err(|e| SelspeakError::Clipboard(format!("Failed to get from clipboard: {}", e)))
    }
}

/// Selection-dump utility such as xclip or xsel
pub struct CommandSource<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    args: Vec<OsString>,
    description: String,
}

impl<'a> CommandSource<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: &str, args: &[&str], description: &str) -> Self {
        Self {
            runner,
            program: program.to_string(),
            args: process::args(args),
            description: description.to_string(),
        }
    }
}

impl TextSource for CommandSource<'_> {
    fn describe(&self) -> &str {
        &self.description
    }

    fn read(&self) -> Result<String> {
        let output = self.runner.run(&self.program, &self.args)?;
        if !output.success() {
            return Err(SelspeakError::Clipboard(format!(
                "{} failed: {}",
                self.program,
                output.failure_reason()
            )));
        }
        Ok(output.stdout)
    }
}

/// Where acquired text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOrigin {
    /// Passed on the command line
    Argument,
    /// Read from the named desktop source
    Source(String),
}

/// Text ready for synthesis, always trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    pub text: String,
    pub origin: TextOrigin,
}

/// Ordered chain of text sources
pub struct TextAcquirer<'a> {
    sources: Vec<Box<dyn TextSource + 'a>>,
}

impl<'a> TextAcquirer<'a> {
    /// Build an acquirer from an explicit source list
    pub fn new(sources: Vec<Box<dyn TextSource + 'a>>) -> Self {
        Self { sources }
    }

    /// The standard chain: native clipboard, then xclip and xsel fallbacks
    pub fn system(runner: &'a dyn CommandRunner, session: Session) -> Self {
        let mut sources: Vec<Box<dyn TextSource + 'a>> = vec![Box::new(NativeClipboard::new(session))];
        sources.extend(Self::selection_fallbacks(runner));
        Self::new(sources)
    }

    /// Fallback tools, in the order they are tried
    pub fn selection_fallbacks(runner: &'a dyn CommandRunner) -> Vec<Box<dyn TextSource + 'a>> {
        vec![
            Box::new(CommandSource::new(
                runner,
                "xclip",
                &["-o", "-selection", "primary"],
                "X11 primary selection",
            )),
            Box::new(CommandSource::new(runner, "xclip", &["-o"], "X11 clipboard")),
            Box::new(CommandSource::new(
                runner,
                "xsel",
                &["-o", "--primary"],
                "XSel primary selection",
            )),
        ]
    }

    /// Get text to speak
    ///
    /// Explicit text wins when it is non-empty after trimming. Otherwise
    /// sources are tried in order until one yields non-whitespace text.
    /// Returns [`SelspeakError::NoText`] when every source comes up empty.
    pub fn acquire(&self, explicit: Option<&str>) -> Result<Acquired> {
        if let Some(text) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
            debug!("Using {} chars of explicit text", text.chars().count());
            return Ok(Acquired {
                text: text.to_string(),
                origin: TextOrigin::Argument,
            });
        }

        self.sources
            .iter()
            .find_map(|source| match source.read() {
                Ok(raw) => {
                    let text = raw.trim();
                    if text.is_empty() {
                        debug!("{} is empty", source.describe());
                        None
                    } else {
                        info!("Got {} chars via {}", text.chars().count(), source.describe());
                        Some(Acquired {
                            text: text.to_string(),
                            origin: TextOrigin::Source(source.describe().to_string()),
                        })
                    }
                }
                Err(e) => {
                    debug!("{} unavailable: {}", source.describe(), e);
                    None
                }
            })
            .ok_or(SelspeakError::NoText)
    }
}
