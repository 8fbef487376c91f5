use std::collections::HashSet;

use cvsift_core::Lexicon;

use crate::config::ParsingConfig;

/// Contiguous n-grams of `tokens` for every `n` in `min_len..=max_len`,
/// space-joined, grouped by start position and then by length.
pub fn everygrams(tokens: &[String], min_len: usize, max_len: usize) -> Vec<String> {
    let min_len = min_len.max(1);
    let mut grams = Vec::new();
    for start in 0..tokens.len() {
        for len in min_len..=max_len {
            let Some(window) = tokens.get(start..start + len) else {
                break;
            };
            grams.push(window.join(" "));
        }
    }
    grams
}

/// Drop stopwords and anything that is not purely alphabetic.
///
/// Stopword comparison is exact against the (lower-case) list, so `IT` is kept
/// while `it` is not.
pub fn filter_tokens(tokens: &[String], stopwords: &HashSet<String>) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !t.is_empty() && t.chars().all(char::is_alphabetic))
        .filter(|t| !stopwords.contains(t.as_str()))
        .cloned()
        .collect()
}

/// Skills found in `tokens`, as single words or phrases of up to three words.
pub fn extract_skills(tokens: &[String], skills: &Lexicon) -> Vec<String> {
    extract_skills_with_config(tokens, skills, &ParsingConfig::default())
}

pub(crate) fn extract_skills_with_config(
    tokens: &[String],
    skills: &Lexicon,
    config: &ParsingConfig,
) -> Vec<String> {
    let filtered = filter_tokens(tokens, &config.stopword_set());

    let mut seen = HashSet::new();
    let mut found = Vec::new();
    // everygrams(.., 1, n) visits each start position's unigram before its
    // longer phrases, which keeps the result in document order.
    for candidate in everygrams(&filtered, 1, config.max_ngram()) {
        if skills.contains(&candidate) && seen.insert(candidate.to_lowercase()) {
            found.push(candidate);
        }
    }

    tracing::debug!(skills = found.len(), "skill lookup done");
    found
}
