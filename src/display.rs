//! Text previews for terminal output

use unicode_width::UnicodeWidthChar;

/// Shorten `text` to at most `max_width` terminal columns
///
/// Line breaks and tabs are shown as spaces so the preview stays on one
/// line. An ellipsis is appended when anything was cut.
pub fn preview(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;

    for ch in text.chars() {
        let ch = if ch.is_whitespace() { ' ' } else { ch };
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            out.push_str("...");
            return out;
        }
        width += w;
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn test_wide_characters_count_double() {
        // Each CJK character takes two columns
        assert_eq!(preview("世界你好", 5), "世界...");
    }

    #[test]
    fn test_newlines_flattened() {
        assert_eq!(preview("one\ntwo\tthree", 40), "one two three");
    }
}
