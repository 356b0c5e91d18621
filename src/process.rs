//! External command execution
//!
//! Every tool selspeak talks to (the speech engine, xclip, xsel) is a
//! blocking subprocess. Callers go through [`CommandRunner`] so the
//! severity of a failure is decided at each call site.

use crate::{Result, SelspeakError};
use log::debug;
use std::ffi::OsString;
use std::io;
use std::process::{Command, Stdio};

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful exit with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed exit with the given code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Short description of why the command failed, for user messages
    pub fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external programs to completion
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// Returns [`SelspeakError::NotInstalled`] when the program cannot be
    /// found. A non-zero exit is not an error here; inspect
    /// [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput> {
        debug!("Running {} with {} args", program, args.len());

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SelspeakError::NotInstalled(program.to_string()),
                _ => SelspeakError::Io(e),
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!("{} exited with {:?}", program, result.code);
        Ok(result)
    }
}

/// Convert borrowed argument literals into an owned argument list
pub fn args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
}
