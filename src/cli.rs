//! Command line interface

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Examples:
  selspeak                      Speak the selected text
  selspeak -v en -s 200         English voice, speed 200
  selspeak -o speech.wav        Save to a file instead of playing
  selspeak -l                   List available voices
  selspeak -t \"Hello world\"     Speak the given text
  selspeak -v ru -s 120 -p 60   Russian, slow, higher pitch";

#[derive(Parser, Debug, Default, Clone)]
#[command(name = crate::APP_NAME)]
#[command(version)]
#[command(about = "Speak the selected text or clipboard contents with espeak")]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Voice or language (ru, en, de, ...) [default: ru]
    #[arg(short, long)]
    pub voice: Option<String>,

    /// Speech rate in words per minute, 80-260 [default: 160]
    #[arg(short, long, allow_negative_numbers = true)]
    pub speed: Option<i32>,

    /// Voice pitch, 0-99 [default: 50]
    #[arg(short, long, allow_negative_numbers = true)]
    pub pitch: Option<i32>,

    /// Volume, 0-200 [default: 100]
    #[arg(short, long, allow_negative_numbers = true)]
    pub amplitude: Option<i32>,

    /// Save speech to this WAV file instead of playing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show available voices and exit
    #[arg(short, long)]
    pub list_voices: bool,

    /// Print the voice list as JSON (with --list-voices)
    #[arg(long, requires = "list_voices")]
    pub json: bool,

    /// Text to speak; read from the selection when omitted
    #[arg(short, long)]
    pub text: Option<String>,

    /// Check the installation and speak a test phrase
    #[arg(long)]
    pub test: bool,

    /// Speech engine executable [default: espeak]
    #[arg(long, value_name = "PROGRAM")]
    pub engine: Option<String>,

    /// Config file [default: ~/.selspeak.cfg]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Don't ask before speaking long texts
    #[arg(short, long)]
    pub yes: bool,

    /// Write debug logs to selspeak.log
    #[arg(short, long)]
    pub debug: bool,
}

/// What the invocation should do after the dependency check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    ListVoices { json: bool },
    SelfTest,
    Speak { text: Option<String>, confirm: bool },
}

impl Args {
    /// Select the mode; listing wins over the self-test, which wins over speaking
    pub fn mode(&self) -> Mode {
        if self.list_voices {
            Mode::ListVoices { json: self.json }
        } else if self.test {
            Mode::SelfTest
        } else {
            Mode::Speak {
                text: self.text.clone(),
                confirm: !self.yes,
            }
        }
    }

    /// Overlay command line flags on settings loaded from config
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(engine) = &self.engine {
            settings.engine = engine.clone();
        }
        if let Some(voice) = &self.voice {
            settings.params.voice = voice.clone();
        }
        if let Some(speed) = self.speed {
            settings.params.speed = speed;
        }
        if let Some(pitch) = self.pitch {
            settings.params.pitch = pitch;
        }
        if let Some(amplitude) = self.amplitude {
            settings.params.amplitude = amplitude;
        }
        if let Some(output) = &self.output {
            settings.output = Some(output.clone());
        }
        settings
    }
}
