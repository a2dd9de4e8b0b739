//! Newline escaping for long-form astro text.
//!
//! Persisted text replaces every line break with the two-character sequence
//! `\n`; display paths decode it back.

const ESCAPED_NEWLINE: &str = "\\n";

/// Replaces real line breaks (`\r\n` or `\n`) with a literal `\n`.
///
/// Idempotent: escaped text contains no real line breaks.
pub fn escape_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', ESCAPED_NEWLINE)
}

/// Replaces every literal `\n` with a real line break.
pub fn unescape_newlines(value: &str) -> String {
    value.replace(ESCAPED_NEWLINE, "\n")
}

#[cfg(test)]
mod tests {
    use super::{escape_newlines, unescape_newlines};

    #[test]
    fn escape_turns_line_breaks_into_two_characters() {
        let escaped = escape_newlines("Line1\nLine2\r\nLine3");
        assert_eq!(escaped, "Line1\\nLine2\\nLine3");
        assert!(!escaped.contains('\n'));
    }

    #[test]
    fn escape_is_idempotent() {
        let once = escape_newlines("a\nb");
        assert_eq!(escape_newlines(&once), once);
    }

    #[test]
    fn unescape_restores_line_breaks() {
        assert_eq!(unescape_newlines("Line1\\nLine2"), "Line1\nLine2");
        assert_eq!(unescape_newlines("plain"), "plain");
    }
}
