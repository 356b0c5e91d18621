//! Invocation flow
//!
//! `dependency check -> {list voices | self-test | acquire and speak} -> exit`
//!
//! Every failure is turned into a message on the output stream and an
//! [`Outcome`]; only I/O errors on that stream propagate.

use crate::cli::Mode;
use crate::clipboard::{TextAcquirer, TextOrigin};
use crate::config::Settings;
use crate::display::preview;
use crate::speech::{Engine, Utterance, VoiceParams};
use crate::{Result, SelspeakError};
use log::{debug, info};
use std::io::{BufRead, Write};

/// Phrase spoken by the self-test, in the default Russian voice
pub const TEST_PHRASE: &str = "Тест работы TTS системы";

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user declined to speak a long text
    Cancelled,
    MissingDependency,
    NoText,
    SynthesisFailed,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Completed | Outcome::Cancelled => 0,
            Outcome::MissingDependency | Outcome::NoText | Outcome::SynthesisFailed => 1,
        }
    }
}

/// One invocation: fixed settings, the engine and the text sources
pub struct App<'a> {
    settings: &'a Settings,
    engine: Engine<'a>,
    acquirer: TextAcquirer<'a>,
}

impl<'a> App<'a> {
    pub fn new(settings: &'a Settings, engine: Engine<'a>, acquirer: TextAcquirer<'a>) -> Self {
        Self {
            settings,
            engine,
            acquirer,
        }
    }

    /// Run the dependency check and then the selected mode
    pub fn run(&self, mode: &Mode, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<Outcome> {
        if let Err(e) = self.engine.probe() {
            self.print_install_help(&e, out)?;
            return Ok(Outcome::MissingDependency);
        }

        debug!("Running {:?}", mode);
        match mode {
            Mode::ListVoices { json } => self.list_voices(*json, out),
            Mode::SelfTest => self.self_test(out),
            Mode::Speak { text, confirm } => self.speak_selection(text.as_deref(), *confirm, input, out),
        }
    }

    fn print_install_help(&self, error: &SelspeakError, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Error: {}", error)?;
        writeln!(out, "{} is required to speak text.", self.engine.program())?;
        writeln!(out, "Install it with: sudo apt install espeak")?;
        writeln!(out, "Or choose another espeak-compatible engine with --engine")?;
        Ok(())
    }

    fn list_voices(&self, json: bool, out: &mut dyn Write) -> Result<Outcome> {
        let voices = self.engine.voices();

        if json {
            serde_json::to_writer_pretty(&mut *out, &voices)?;
            writeln!(out)?;
            return Ok(Outcome::Completed);
        }

        writeln!(out, "Available voices:")?;
        writeln!(out, "{}", "-".repeat(50))?;
        for voice in &voices {
            writeln!(out, "{:<8} - {}", voice.code, voice.name)?;
        }
        Ok(Outcome::Completed)
    }

    fn self_test(&self, out: &mut dyn Write) -> Result<Outcome> {
        writeln!(out, "=== SELF-TEST ===")?;
        writeln!(out, "1. Checking dependencies... ✓")?;
        writeln!(out, "2. Checking available voices...")?;

        let codes = self.engine.available_codes();
        writeln!(out, "   Voices available: {}", codes.len())?;
        let examples: Vec<&str> = codes.iter().take(5).map(String::as_str).collect();
        writeln!(out, "   Examples: {}", examples.join(", "))?;

        writeln!(out, "3. Speech test: '{}'", TEST_PHRASE)?;
        let utterance = Utterance::new(TEST_PHRASE, VoiceParams::default());
        self.speak(&utterance, out)
    }

    fn speak_selection(
        &self,
        explicit: Option<&str>,
        confirm: bool,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        if explicit.map_or(true, |t| t.trim().is_empty()) {
            writeln!(out, "⌛ Reading selected text...")?;
        }

        let acquired = match self.acquirer.acquire(explicit) {
            Ok(acquired) => acquired,
            Err(SelspeakError::NoText) => {
                writeln!(out)?;
                writeln!(out, "Could not get any text!")?;
                writeln!(out)?;
                writeln!(out, "What to do:")?;
                writeln!(out, "  1. Select text in any application")?;
                writeln!(out, "  2. Run again: selspeak")?;
                writeln!(out, "  3. Or pass the text: selspeak -t \"Your text\"")?;
                return Ok(Outcome::NoText);
            }
            Err(e) => return Err(e),
        };

        match &acquired.origin {
            TextOrigin::Argument => {
                writeln!(out, "Text from arguments: {}", preview(&acquired.text, 100))?
            }
            TextOrigin::Source(name) => writeln!(out, "Got text via {}", name)?,
        }

        let length = acquired.text.chars().count();
        if confirm && length > self.settings.confirm_threshold {
            writeln!(out, "⚠ Warning: the text is very long ({} characters)", length)?;
            if !ask_yes_no("Continue? (y/N): ", input, out)? {
                writeln!(out, "Cancelled.")?;
                info!("Long text declined by user");
                return Ok(Outcome::Cancelled);
            }
        }

        writeln!(out, "✓ Text received: {} characters", length)?;
        writeln!(out, "   Start: {}", preview(&acquired.text, 150))?;
        writeln!(out)?;
        writeln!(out, "🎤 Speaking...")?;

        let utterance = Utterance::new(acquired.text, self.settings.params.clone())
            .with_output(self.settings.output.clone());
        self.speak(&utterance, out)
    }

    fn speak(&self, utterance: &Utterance, out: &mut dyn Write) -> Result<Outcome> {
        let params = &utterance.params;
        if let Some(path) = &utterance.output {
            writeln!(out, "✓ Saving audio to: {}", path.display())?;
        }
        writeln!(
            out,
            "Voice: {}, speed: {}, pitch: {}",
            params.voice, params.speed, params.pitch
        )?;
        out.flush()?;

        match self.engine.speak(utterance) {
            Ok(()) => {
                match &utterance.output {
                    Some(path) => writeln!(out, "✅ Done! Audio saved: {}", path.display())?,
                    None => writeln!(out, "✅ Finished speaking!")?,
                }
                Ok(Outcome::Completed)
            }
            Err(SelspeakError::Synthesis(reason)) => {
                writeln!(out, "✗ {} error: {}", self.engine.program(), reason)?;
                writeln!(out, "❌ Speech failed")?;
                Ok(Outcome::SynthesisFailed)
            }
            Err(e) => Err(e),
        }
    }
}

/// Prompt for a y/N answer; anything but `y` (including EOF) is no
fn ask_yes_no(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<bool> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
