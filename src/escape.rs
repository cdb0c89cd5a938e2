//! Escape layer that hides backslash-escaped delimiters from the tokenizer.

/// Escape sequences and the placeholder runs that stand in for them.
/// Placeholders contain no quotes and no whitespace, so the tokenizer can
/// treat every remaining space as a separator.
const ESCAPES: [(&str, &str); 3] = [
    ("\\'", "(#SINGLE#)"),
    ("\\\"", "(#DOUBLE#)"),
    ("\\ ", "(#SPACE#)"),
];

/// Replace `\'`, `\"` and `\ ` with their placeholder runs.
pub fn escape(input: &str) -> String {
    ESCAPES
        .iter()
        .fold(input.to_string(), |text, (sequence, placeholder)| {
            text.replace(sequence, placeholder)
        })
}

/// Exact inverse of [`escape`].
pub fn descape(input: &str) -> String {
    ESCAPES
        .iter()
        .fold(input.to_string(), |text, (sequence, placeholder)| {
            text.replace(placeholder, sequence)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_hides_quotes_and_spaces() {
        assert_eq!(escape("a\\'b"), "a(#SINGLE#)b");
        assert_eq!(escape("a\\\"b"), "a(#DOUBLE#)b");
        assert_eq!(escape("a\\ b"), "a(#SPACE#)b");
    }

    #[test]
    fn test_escaped_text_has_no_delimiters() {
        let escaped = escape("\\'\\\"\\ ");
        assert!(!escaped.contains('\''));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains(' '));
    }

    #[test]
    fn test_descape_is_exact_inverse() {
        let samples = [
            "",
            "plain text",
            "\\'",
            "\\\"",
            "\\ ",
            "it\\'s a \\\"quoted\\\" word",
            "one\\ two\\ three",
            "\\'\\\"\\ \\'\\\"\\ ",
        ];
        for sample in samples {
            assert_eq!(descape(&escape(sample)), sample);
        }
    }

    #[test]
    fn test_untouched_text_passes_through() {
        assert_eq!(escape("key=123 'a b'"), "key=123 'a b'");
        assert_eq!(descape("key=123 'a b'"), "key=123 'a b'");
    }
}
