//! Speech synthesis through an external engine

pub mod engine;
pub mod voices;

pub use engine::{Engine, Utterance, VoiceParams};
pub use voices::{Voice, FALLBACK_VOICES};
