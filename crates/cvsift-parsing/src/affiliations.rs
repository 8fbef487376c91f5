use std::collections::HashSet;

use crate::config::ParsingConfig;

pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "university",
    "school",
    "college",
    "institute",
    "polytechnic",
    "campus",
];

pub const ORGANIZATION_KEYWORDS: &[&str] = &[
    "inc",
    "society",
    "societies",
    "forces",
    "force",
    "conglomerate",
    "conglomerates",
    "enterprise",
    "enterprises",
    "industry",
    "industries",
    "service",
    "services",
    "private limited",
    "pvt ltd",
    "pte ltd",
    "technologies",
];

/// Lower-cased alphanumeric words of a line.
fn line_words(line: &str) -> Vec<String> {
    line.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True if the keyword's words appear contiguously in `words`.
fn contains_keyword(words: &[String], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    if parts.is_empty() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(w, p)| w.eq_ignore_ascii_case(p)))
}

/// Trimmed, non-empty lines accepted by `keep`, unique, in document order.
fn collect_lines(text: &str, mut keep: impl FnMut(&[String]) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| keep(&line_words(line)))
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}

/// Lines mentioning a university, school, college or similar.
pub fn extract_institutions(text: &str) -> Vec<String> {
    extract_institutions_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_institutions_with_config(text: &str, config: &ParsingConfig) -> Vec<String> {
    let keywords = config.institution_keywords.resolve_str(INSTITUTION_KEYWORDS);
    let found = collect_lines(text, |words| {
        keywords.iter().any(|k| contains_keyword(words, k))
    });
    tracing::debug!(institutions = found.len(), "institution lines");
    found
}

/// Lines that look like an organisation name: an organisation keyword
/// (`Inc`, `Technologies`, `Pvt Ltd`, ...) and no stopword at all.
///
/// The stopword rule keeps prose such as "worked with the services team" out.
pub fn extract_organizations(text: &str, stopwords: &HashSet<String>) -> Vec<String> {
    let keywords = ParsingConfig::default()
        .organization_keywords
        .resolve_str(ORGANIZATION_KEYWORDS);
    organizations(text, &keywords, stopwords)
}

pub(crate) fn extract_organizations_with_config(text: &str, config: &ParsingConfig) -> Vec<String> {
    let keywords = config.organization_keywords.resolve_str(ORGANIZATION_KEYWORDS);
    let found = organizations(text, &keywords, &config.stopword_set());
    tracing::debug!(organizations = found.len(), "organisation lines");
    found
}

fn organizations(text: &str, keywords: &[String], stopwords: &HashSet<String>) -> Vec<String> {
    collect_lines(text, |words| {
        keywords.iter().any(|k| contains_keyword(words, k))
            && !words.iter().any(|w| stopwords.contains(w))
    })
}
