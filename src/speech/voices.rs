//! Voice catalog parsing

use serde::Serialize;

/// A voice the engine can speak with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Language code passed to `-v`
    pub code: String,
    /// Display name
    pub name: String,
}

impl Voice {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Voices assumed when the engine can't be asked
pub const FALLBACK_VOICES: &[(&str, &str)] = &[
    ("ru", "Russian"),
    ("en", "English"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
];

/// The built-in fallback list as owned voices
pub fn fallback() -> Vec<Voice> {
    FALLBACK_VOICES
        .iter()
        .map(|&(code, name)| Voice::new(code, name))
        .collect()
}

/// Parse `espeak --voices` output
///
/// The first line is a header. Each following line looks like
///
/// ```text
///  5  en-gb          --/M      English_(Great_Britain) gmw/en       (en 2)
/// ```
///
/// The second column is the language code and everything from the fourth
/// column on is the display name. Lines with fewer than four columns are
/// skipped.
pub fn parse_listing(output: &str) -> Vec<Voice> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            Some(Voice::new(parts[1], parts[3..].join(" ")))
        })
        .collect()
}

/// Sorted, de-duplicated codes
pub fn unique_codes(voices: &[Voice]) -> Vec<String> {
    let mut codes: Vec<String> = voices.iter().map(|v| v.code.clone()).collect();
    codes.sort();
    codes.dedup();
    codes
}
