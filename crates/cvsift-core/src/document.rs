use once_cell::unsync::OnceCell;

/// Input text for one parse call, with a lazily built case-folded copy.
///
/// The folded copy lower-cases char by char but keeps any char whose
/// lowercase form has a different UTF-8 length, so a byte offset found in
/// [`folded`](Self::folded) is a valid offset (and char boundary) in
/// [`text`](Self::text).
#[derive(Debug)]
pub struct RawDocument<'a> {
    text: &'a str,
    folded: OnceCell<String>,
}

impl<'a> RawDocument<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            folded: OnceCell::new(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True if the text has no letters or digits at all.
    pub fn is_blank(&self) -> bool {
        !self.text.chars().any(char::is_alphanumeric)
    }

    /// Offset-preserving lowercase copy, computed on first use.
    pub fn folded(&self) -> &str {
        self.folded.get_or_init(|| fold_case(self.text))
    }
}

/// Lower-case `text` without changing the byte length of any char.
pub fn fold_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) if l.len_utf8() == c.len_utf8() => out.push(l),
            _ => out.push(c),
        }
    }
    out
}
