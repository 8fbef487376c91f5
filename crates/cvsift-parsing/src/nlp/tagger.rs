use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use cvsift_core::Token;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("tagger failed: {0}")]
    Failed(String),
    #[error("tagger returned {got} tags for {expected} tokens")]
    LengthMismatch { expected: usize, got: usize },
}

/// Trait for part-of-speech taggers.
///
/// Implementors return one Penn Treebank style tag per input token, in the
/// same order. A tagger error is an infrastructure failure and aborts the
/// parse call, unlike a heuristic miss.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TaggerError>;
}

/// Closed-class English words and their tags.
static CLOSED_CLASS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let groups: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "a", "an", "the", "this", "that", "these", "those", "every", "each", "some",
                "any", "no", "all", "both", "another", "either", "neither",
            ],
        ),
        (
            "IN",
            &[
                "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "upon",
                "about", "above", "across", "after", "against", "along", "among", "around",
                "before", "behind", "below", "beneath", "beside", "between", "beyond",
                "during", "except", "inside", "near", "off", "outside", "over", "past",
                "since", "through", "throughout", "toward", "towards", "under", "until",
                "up", "via", "within", "without", "as", "than", "because", "although",
                "though", "while", "whereas", "if", "whether",
            ],
        ),
        ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
        (
            "PRP",
            &[
                "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves",
                "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
        (
            "MD",
            &["can", "could", "may", "might", "must", "shall", "should", "will", "would"],
        ),
        ("TO", &["to"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBP", &["are", "am", "have", "do"]),
        ("VBD", &["was", "were", "had", "did"]),
        ("VB", &["be"]),
        ("VBN", &["been"]),
        ("VBG", &["being"]),
        ("WDT", &["which"]),
        ("WP", &["who", "whom", "what"]),
        ("WP$", &["whose"]),
        ("WRB", &["when", "where", "why", "how"]),
        (
            "RB",
            &["not", "never", "very", "also", "too", "just", "only", "now", "then", "here", "there"],
        ),
    ];
    for (tag, words) in groups {
        for word in *words {
            m.insert(*word, *tag);
        }
    }
    m
});

/// Rule-based tagger: closed-class tables, punctuation, numerals, a few
/// suffix rules, then capitalisation (`NNP`) and a noun (`NN`) fallback.
///
/// Good enough to find capitalised noun runs near the top of a résumé;
/// nowhere near a trained model.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Tag a single token without context.
    pub fn tag_word(word: &str) -> &'static str {
        let Some(first) = word.chars().next() else {
            return "SYM";
        };

        if !word.chars().any(char::is_alphanumeric) {
            return punctuation_tag(word);
        }

        if !word.chars().any(char::is_alphabetic) {
            return "CD";
        }

        let lower = word.to_lowercase();
        if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
            return *tag;
        }

        if first.is_uppercase() {
            return "NNP";
        }

        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ing") {
            "VBG"
        } else if len > 3 && lower.ends_with("ed") {
            "VBD"
        } else if len > 3 && lower.ends_with("ly") {
            "RB"
        } else if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
            "NNS"
        } else {
            "NN"
        }
    }
}

fn punctuation_tag(word: &str) -> &'static str {
    match word {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "'" | "`" => "''",
        "$" => "$",
        "#" => "#",
        _ => "SYM",
    }
}

impl PosTagger for HeuristicTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TaggerError> {
        Ok(tokens
            .iter()
            .map(|t| Token::new(t.as_str(), Self::tag_word(t)))
            .collect())
    }
}
