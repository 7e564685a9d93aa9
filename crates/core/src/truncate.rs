//! Character-bounded truncation for text handed back to an agent.
//!
//! The bound counts Unicode scalar values, so the cut never splits a code
//! point and the result does not depend on platform or locale.

use std::borrow::Cow;

/// Text after bounding, plus whether anything was cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<'a> {
    pub text: Cow<'a, str>,
    pub truncated: bool,
}

/// Cut `text` to at most `max_chars` characters.
///
/// Text that already fits is returned borrowed and unchanged.
pub fn truncate_chars(text: &str, max_chars: usize) -> Truncated<'_> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Truncated { text: Cow::Borrowed(&text[..byte_idx]), truncated: true },
        None => Truncated { text: Cow::Borrowed(text), truncated: false },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let html = "<html><body>hello</body></html>";
        let out = truncate_chars(html, 1000);
        assert_eq!(out.text, html);
        assert!(!out.truncated);
        assert!(matches!(out.text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_exact_length_not_truncated() {
        let out = truncate_chars("abcde", 5);
        assert_eq!(out.text, "abcde");
        assert!(!out.truncated);
    }

    #[test]
    fn test_long_text_cut_to_bound() {
        let input = "x".repeat(80_000);
        let out = truncate_chars(&input, 50_000);
        assert!(out.truncated);
        assert_eq!(out.text.chars().count(), 50_000);
        assert_eq!(out.text, &input[..50_000]);
    }

    #[test]
    fn test_idempotent() {
        let input: String = (0..10_000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let once = truncate_chars(&input, 777).text.into_owned();
        let twice = truncate_chars(&once, 777);
        assert_eq!(twice.text, once);
        assert!(!twice.truncated);
    }

    #[test]
    fn test_multibyte_boundary() {
        let input = "héllo wörld 日本語";
        let out = truncate_chars(input, 14);
        assert_eq!(out.text, "héllo wörld 日本");
        assert_eq!(out.text.chars().count(), 14);
        assert!(out.truncated);
    }

    #[test]
    fn test_zero_bound() {
        let out = truncate_chars("abc", 0);
        assert_eq!(out.text, "");
        assert!(out.truncated);

        let out = truncate_chars("", 0);
        assert_eq!(out.text, "");
        assert!(!out.truncated);
    }
}
