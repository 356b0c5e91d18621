//! Configuration management
//!
//! Settings come from three layers: built-in defaults, the optional INI
//! file at `~/.selspeak.cfg`, and command line flags. The merged result is
//! an immutable [`Settings`] value handed to every operation.

use crate::speech::engine::DEFAULT_ENGINE;
use crate::speech::VoiceParams;
use crate::{Result, SelspeakError};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Texts longer than this many characters need confirmation by default
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 1000;

/// Everything an invocation needs to know, fixed before any work starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Speech engine executable
    pub engine: String,
    pub params: VoiceParams,
    /// Write audio here instead of playing it
    pub output: Option<PathBuf>,
    /// Ask before speaking texts longer than this many characters
    pub confirm_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            params: VoiceParams::default(),
            output: None,
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
        }
    }
}

/// Contents of the INI config file
///
/// ```ini
/// [general]
/// engine = espeak-ng
/// confirm_threshold = 2000
///
/// [speech]
/// voice = en
/// speed = 175
/// pitch = 50
/// amplitude = 100
/// output = /tmp/last.wav
/// ```
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load the config file from its default location
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load a config file, or start empty when it doesn't exist
    ///
    /// A missing file is not an error and is not created.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SelspeakError::IniParse(format!("Failed to load {}: {}", path.display(), e)))?
        } else {
            info!("Config file {:?} not found, using defaults", path);
            Ini::new()
        };

        Ok(Self { ini, path })
    }

    /// Default config file path (~/.selspeak.cfg)
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".selspeak.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config, falling back on parse errors
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.get_parsed(section, key).unwrap_or(default)
    }

    fn get_parsed<T: std::str::FromStr>(&self, section: &str, key: &str) -> Option<T> {
        let raw = self.ini.get_from(Some(section), key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid {}.{} = {:?} in {:?}", section, key, raw, self.path);
                None
            }
        }
    }

    /// Speech engine executable
    pub fn engine(&self) -> String {
        self.get_string("general", "engine", DEFAULT_ENGINE)
    }

    /// Length above which the user is asked before speaking
    pub fn confirm_threshold(&self) -> usize {
        self.get_parsed("general", "confirm_threshold")
            .unwrap_or(DEFAULT_CONFIRM_THRESHOLD)
    }

    /// Voice parameters with built-in defaults for anything unset
    pub fn voice_params(&self) -> VoiceParams {
        let defaults = VoiceParams::default();
        VoiceParams {
            voice: self.get_string("speech", "voice", &defaults.voice),
            speed: self.get_int("speech", "speed", defaults.speed),
            pitch: self.get_int("speech", "pitch", defaults.pitch),
            amplitude: self.get_int("speech", "amplitude", defaults.amplitude),
        }
    }

    /// Default output file, if configured
    pub fn output(&self) -> Option<PathBuf> {
        self.ini
            .get_from(Some("speech"), "output")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Settings described by this file
    pub fn settings(&self) -> Settings {
        Settings {
            engine: self.engine(),
            params: self.voice_params(),
            output: self.output(),
            confirm_threshold: self.confirm_threshold(),
        }
    }
}
