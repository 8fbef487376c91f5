use once_cell::sync::Lazy;
use regex::Regex;

/// Split text into word and punctuation tokens, in document order.
///
/// A word is a run of word characters that may be joined by single inner
/// `'`, `.` or `-` (`don't`, `example.com`, `full-stack`); every other
/// non-space character becomes a token of its own.
pub fn word_tokenize(text: &str) -> Vec<String> {
    static TOKEN_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\w+(?:['.\-]\w+)*|[^\w\s]").unwrap());

    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
