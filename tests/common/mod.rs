//! Shared helpers for integration tests

#![allow(dead_code)]

use selspeak::process::{CommandOutput, CommandRunner};
use selspeak::{Result, SelspeakError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;

/// Runner that answers from a per-program table and records every call
///
/// Programs without an entry behave as not installed.
#[derive(Default)]
pub struct FakeRunner {
    replies: HashMap<String, Vec<(Option<Vec<OsString>>, CommandOutput)>>,
    calls: RefCell<Vec<(String, Vec<OsString>)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A working espeak: answers --version and plays anything
    pub fn with_engine() -> Self {
        Self::new()
            .on("espeak", &["--version"], CommandOutput::ok("eSpeak text-to-speech: 1.48.15\n"))
            .on_any("espeak", CommandOutput::ok(""))
    }

    pub fn on(mut self, program: &str, args: &[&str], output: CommandOutput) -> Self {
        let args = args.iter().map(OsString::from).collect();
        self.replies
            .entry(program.to_string())
            .or_default()
            .push((Some(args), output));
        self
    }

    pub fn on_any(mut self, program: &str, output: CommandOutput) -> Self {
        self.replies
            .entry(program.to_string())
            .or_default()
            .push((None, output));
        self
    }

    pub fn calls_to(&self, program: &str) -> Vec<Vec<OsString>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(p, _)| p == program)
            .map(|(_, a)| a.clone())
            .collect()
    }

    /// Engine calls other than the --version probe and --voices query
    pub fn synthesis_calls(&self) -> Vec<Vec<OsString>> {
        self.calls_to("espeak")
            .into_iter()
            .filter(|a| a.first().map_or(false, |first| first == "-v"))
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));

        let entries = self
            .replies
            .get(program)
            .ok_or_else(|| SelspeakError::NotInstalled(program.to_string()))?;

        entries
            .iter()
            .find(|(expected, _)| expected.as_deref() == Some(args))
            .or_else(|| entries.iter().find(|(expected, _)| expected.is_none()))
            .map(|(_, output)| output.clone())
            .ok_or_else(|| SelspeakError::NotInstalled(program.to_string()))
    }
}
