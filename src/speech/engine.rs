//! Speech engine invocation
//!
//! The engine is an espeak-compatible command line program. selspeak only
//! builds its argument list and runs it; ranges and defaults for rate,
//! pitch and amplitude are the engine's business.

use super::voices::{self, Voice};
use crate::process::CommandRunner;
use crate::{Result, SelspeakError};
use log::{debug, error, info, warn};
use std::ffi::OsString;
use std::path::PathBuf;

/// Default engine executable
pub const DEFAULT_ENGINE: &str = "espeak";

/// Voice settings passed straight through to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceParams {
    /// Voice or language selector (`-v`)
    pub voice: String,
    /// Words per minute (`-s`)
    pub speed: i32,
    /// Pitch (`-p`)
    pub pitch: i32,
    /// Amplitude (`-a`)
    pub amplitude: i32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice: "ru".to_string(),
            speed: 160,
            pitch: 50,
            amplitude: 100,
        }
    }
}

/// One synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub params: VoiceParams,
    /// Write audio to this file instead of playing it
    pub output: Option<PathBuf>,
}

impl Utterance {
    pub fn new(text: impl Into<String>, params: VoiceParams) -> Self {
        Self {
            text: text.into(),
            params,
            output: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

/// Handle to the external speech engine
pub struct Engine<'a> {
    program: String,
    runner: &'a dyn CommandRunner,
}

impl<'a> Engine<'a> {
    pub fn new(program: impl Into<String>, runner: &'a dyn CommandRunner) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// Engine executable name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check that the engine can be launched
    ///
    /// Runs `<engine> --version` and returns the first line it prints.
    pub fn probe(&self) -> Result<String> {
        debug!("Probing {}", self.program);

        let output = match self.runner.run(&self.program, &[OsString::from("--version")]) {
            Ok(output) => output,
            Err(SelspeakError::NotInstalled(program)) => {
                return Err(SelspeakError::MissingDependency(format!(
                    "{} is not installed",
                    program
                )));
            }
            Err(e) => {
                return Err(SelspeakError::MissingDependency(format!(
                    "{} could not be started: {}",
                    self.program, e
                )));
            }
        };

        if !output.success() {
            return Err(SelspeakError::MissingDependency(format!(
                "{} --version failed: {}",
                self.program,
                output.failure_reason()
            )));
        }

        let version = output.stdout.lines().next().unwrap_or("").trim().to_string();
        info!("Found {}: {}", self.program, version);
        Ok(version)
    }

    /// Build the engine argument list for an utterance
    ///
    /// The end-of-options marker always sits directly before the text so
    /// text starting with `-` is never read as a flag. The file output flag
    /// goes in front of that marker. The path is passed as raw OS bytes.
    pub fn build_args(utterance: &Utterance) -> Vec<OsString> {
        let params = &utterance.params;
        let mut args: Vec<OsString> = vec![
            "-v".into(),
            params.voice.as_str().into(),
            "-s".into(),
            params.speed.to_string().into(),
            "-p".into(),
            params.pitch.to_string().into(),
            "-a".into(),
            params.amplitude.to_string().into(),
        ];

        if let Some(path) = &utterance.output {
            args.push("-w".into());
            args.push(path.as_os_str().to_owned());
        }

        args.push("--".into());
        args.push(utterance.text.as_str().into());
        args
    }

    /// Speak or render an utterance, waiting for the engine to finish
    pub fn speak(&self, utterance: &Utterance) -> Result<()> {
        debug!(
            "Synthesizing {} chars with voice {}",
            utterance.text.chars().count(),
            utterance.params.voice
        );

        let args = Self::build_args(utterance);
        let output = self.runner.run(&self.program, &args).map_err(|e| {
            error!("Failed to start {}: {}", self.program, e);
            SelspeakError::Synthesis(format!("failed to start {}: {}", self.program, e))
        })?;

        if !output.success() {
            let reason = output.failure_reason();
            error!("{} failed: {}", self.program, reason);
            return Err(SelspeakError::Synthesis(reason));
        }

        Ok(())
    }

    /// Installed voices, or the built-in fallback list
    ///
    /// Never fails: a missing engine, a failed run and unparseable output
    /// all produce [`voices::fallback`].
    pub fn voices(&self) -> Vec<Voice> {
        let output = match self.runner.run(&self.program, &[OsString::from("--voices")]) {
            Ok(output) if output.success() => output,
            Ok(output) => {
                warn!("{} --voices failed: {}", self.program, output.failure_reason());
                return voices::fallback();
            }
            Err(e) => {
                warn!("Could not list voices: {}", e);
                return voices::fallback();
            }
        };

        let parsed = voices::parse_listing(&output.stdout);
        if parsed.is_empty() {
            warn!("No voices parsed from {} output", self.program);
            return voices::fallback();
        }

        debug!("Parsed {} voices", parsed.len());
        parsed
    }

    /// Sorted, de-duplicated language codes of the available voices
    pub fn available_codes(&self) -> Vec<String> {
        voices::unique_codes(&self.voices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::ScriptedRunner;
    use crate::process::CommandOutput;

    fn utterance(text: &str) -> Utterance {
        Utterance::new(text, VoiceParams::default())
    }

    #[test]
    fn test_build_args_defaults() {
        let args = Engine::build_args(&utterance("привет"));
        assert_eq!(
            args,
            vec!["-v", "ru", "-s", "160", "-p", "50", "-a", "100", "--", "привет"]
        );
    }

    #[test]
    fn test_build_args_with_output() {
        let u = utterance("-rf looks like a flag").with_output(Some(PathBuf::from("out.wav")));
        let args = Engine::build_args(&u);
        assert_eq!(&args[args.len() - 4..], &["-w", "out.wav", "--", "-rf looks like a flag"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_build_args_keeps_non_utf8_output_path() {
        use std::os::unix::ffi::OsStringExt;

        let path = PathBuf::from(OsString::from_vec(b"out\xff.wav".to_vec()));
        let u = utterance("hi").with_output(Some(path.clone()));
        let args = Engine::build_args(&u);

        let n = args.len();
        assert_eq!(args[n - 4], "-w");
        assert_eq!(PathBuf::from(&args[n - 3]), path);
    }

    #[test]
    fn test_params_pass_through_unvalidated() {
        let params = VoiceParams {
            voice: "en-us".to_string(),
            speed: 9999,
            pitch: -5,
            amplitude: 0,
        };
        let args = Engine::build_args(&Utterance::new("x", params));
        assert_eq!(&args[..8], &["-v", "en-us", "-s", "9999", "-p", "-5", "-a", "0"]);
    }

    #[test]
    fn test_probe() {
        let runner = ScriptedRunner::new().on(
            "espeak",
            &["--version"],
            CommandOutput::ok("eSpeak NG text-to-speech: 1.51  Data at: /usr/share\n"),
        );
        let engine = Engine::new("espeak", &runner);
        assert_eq!(
            engine.probe().unwrap(),
            "eSpeak NG text-to-speech: 1.51  Data at: /usr/share"
        );
    }

    #[test]
    fn test_probe_missing_or_broken() {
        let runner = ScriptedRunner::new();
        let engine = Engine::new("espeak", &runner);
        assert!(matches!(engine.probe(), Err(SelspeakError::MissingDependency(_))));

        let runner = ScriptedRunner::new().on_any("espeak", CommandOutput::failed(127, ""));
        let engine = Engine::new("espeak", &runner);
        assert!(matches!(engine.probe(), Err(SelspeakError::MissingDependency(_))));
    }

    #[test]
    fn test_speak_surfaces_engine_error() {
        let runner = ScriptedRunner::new()
            .on_any("espeak", CommandOutput::failed(1, "Error: voice 'xx' not found\n"));
        let engine = Engine::new("espeak", &runner);

        match engine.speak(&utterance("hi")) {
            Err(SelspeakError::Synthesis(msg)) => assert_eq!(msg, "Error: voice 'xx' not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_speak_launch_failure_is_synthesis_error() {
        let runner = ScriptedRunner::new();
        let engine = Engine::new("espeak", &runner);
        assert!(matches!(
            engine.speak(&utterance("hi")),
            Err(SelspeakError::Synthesis(_))
        ));
    }

    #[test]
    fn test_speak_success() {
        let runner = ScriptedRunner::new().on_any("espeak", CommandOutput::ok(""));
        let engine = Engine::new("espeak", &runner);
        assert!(engine.speak(&utterance("hi")).is_ok());
        assert_eq!(runner.calls_to("espeak").len(), 1);
    }

    #[test]
    fn test_voices_fallback_when_engine_fails() {
        let runner = ScriptedRunner::new().on_any("espeak", CommandOutput::failed(1, "boom"));
        let engine = Engine::new("espeak", &runner);
        let codes: Vec<String> = engine.voices().into_iter().map(|v| v.code).collect();
        assert_eq!(codes, vec!["ru", "en", "de", "fr", "es"]);
    }

    #[test]
    fn test_available_codes_sorted_unique() {
        let listing = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  ru              --/M      Russian            zle/ru
 5  en              --/M      default            default
 2  en              --/M      english            gmw/en
 5  de              --/M      German             gmw/de
";
        let runner = ScriptedRunner::new().on("espeak", &["--voices"], CommandOutput::ok(listing));
        let engine = Engine::new("espeak", &runner);
        assert_eq!(engine.available_codes(), vec!["de", "en", "ru"]);
    }
}
