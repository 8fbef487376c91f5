use std::collections::{HashMap, HashSet};

use regex::Regex;
use thiserror::Error;

use cvsift_core::SectionLabel;
use cvsift_core::stopwords::ENGLISH_STOPWORDS;

use crate::nlp::chunker::{ChunkGrammar, GrammarError};

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

impl ListOverride<String> {
    /// Resolve against static string defaults.
    pub fn resolve_str(&self, defaults: &[&str]) -> Vec<String> {
        let owned: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
        self.resolve(&owned)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid chunk grammar: {0}")]
    Grammar(#[from] GrammarError),
}

/// Configuration for the résumé field extraction pipeline.
///
/// Regex fields are `Option<Regex>`: `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── section.rs ──
    /// Per-label heading patterns, matched against the case-folded document.
    pub(crate) section_patterns: HashMap<SectionLabel, Regex>,

    // ── contact.rs ──
    pub(crate) email_re: Option<Regex>,
    pub(crate) phone_re: Option<Regex>,

    // ── name.rs ──
    pub(crate) name_grammar: Option<ChunkGrammar>,

    // ── skills.rs ──
    /// Longest phrase (in tokens) matched against the skills lexicon (default: 3).
    pub(crate) max_ngram: usize,
    pub(crate) stopwords: ListOverride<String>,

    // ── affiliations.rs ──
    pub(crate) institution_keywords: ListOverride<String>,
    pub(crate) organization_keywords: ListOverride<String>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            section_patterns: HashMap::new(),
            email_re: None,
            phone_re: None,
            name_grammar: None,
            max_ngram: 3,
            stopwords: ListOverride::Default,
            institution_keywords: ListOverride::Default,
            organization_keywords: ListOverride::Default,
        }
    }
}

impl ParsingConfig {
    /// Longest skill phrase length.
    pub fn max_ngram(&self) -> usize {
        self.max_ngram
    }

    /// Resolved stopword set.
    pub(crate) fn stopword_set(&self) -> HashSet<String> {
        self.stopwords
            .resolve_str(ENGLISH_STOPWORDS)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect()
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled in [`build()`](Self::build).
/// Fails fast if any pattern or the chunk grammar is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    section_patterns: Vec<(SectionLabel, String)>,
    email_re: Option<String>,
    phone_re: Option<String>,
    name_grammar: Option<String>,
    max_ngram: Option<usize>,
    stopwords: ListOverride<String>,
    institution_keywords: ListOverride<String>,
    organization_keywords: ListOverride<String>,
}

fn push_extend(list: &mut ListOverride<String>, value: String) {
    match list {
        ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(value),
        ListOverride::Default => *list = ListOverride::Extend(vec![value]),
    }
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Section headings ──

    /// Replace the heading pattern for one section. The pattern runs against
    /// the lower-cased document, so it should be written in lower case.
    pub fn section_regex(mut self, label: SectionLabel, pattern: &str) -> Self {
        self.section_patterns.push((label, pattern.to_string()));
        self
    }

    // ── Contact details ──

    pub fn email_regex(mut self, pattern: &str) -> Self {
        self.email_re = Some(pattern.to_string());
        self
    }

    pub fn phone_regex(mut self, pattern: &str) -> Self {
        self.phone_re = Some(pattern.to_string());
        self
    }

    // ── Name chunking ──

    /// Chunk grammar in `LABEL: {<TAG|TAG> <TAG>*}` form.
    pub fn name_grammar(mut self, grammar: &str) -> Self {
        self.name_grammar = Some(grammar.to_string());
        self
    }

    // ── Skills ──

    pub fn max_ngram(mut self, n: usize) -> Self {
        self.max_ngram = Some(n);
        self
    }

    pub fn set_stopwords(mut self, words: Vec<String>) -> Self {
        self.stopwords = ListOverride::Replace(words);
        self
    }

    pub fn add_stopword(mut self, word: String) -> Self {
        push_extend(&mut self.stopwords, word);
        self
    }

    // ── Institution / organisation lines ──

    pub fn set_institution_keywords(mut self, keywords: Vec<String>) -> Self {
        self.institution_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_institution_keyword(mut self, keyword: String) -> Self {
        push_extend(&mut self.institution_keywords, keyword);
        self
    }

    pub fn set_organization_keywords(mut self, keywords: Vec<String>) -> Self {
        self.organization_keywords = ListOverride::Replace(keywords);
        self
    }

    pub fn add_organization_keyword(mut self, keyword: String) -> Self {
        push_extend(&mut self.organization_keywords, keyword);
        self
    }

    /// Compile all string patterns and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ConfigError> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        let mut section_patterns = HashMap::new();
        for (label, pattern) in self.section_patterns {
            section_patterns.insert(label, Regex::new(&pattern)?);
        }

        let name_grammar = self
            .name_grammar
            .map(|g| ChunkGrammar::parse(&g))
            .transpose()?;

        Ok(ParsingConfig {
            section_patterns,
            email_re: compile(self.email_re)?,
            phone_re: compile(self.phone_re)?,
            name_grammar,
            max_ngram: self.max_ngram.unwrap_or(3).max(1),
            stopwords: self.stopwords,
            institution_keywords: self.institution_keywords,
            organization_keywords: self.organization_keywords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.max_ngram, 3);
        assert!(config.section_patterns.is_empty());
        assert!(config.email_re.is_none());
        assert!(config.stopword_set().contains("the"));
    }

    #[test]
    fn test_builder_basic() {
        let config = ParsingConfigBuilder::new().max_ngram(2).build().unwrap();
        assert_eq!(config.max_ngram(), 2);
    }

    #[test]
    fn test_builder_zero_ngram_clamps_to_one() {
        let config = ParsingConfigBuilder::new().max_ngram(0).build().unwrap();
        assert_eq!(config.max_ngram(), 1);
    }

    #[test]
    fn test_builder_custom_section_regex() {
        let config = ParsingConfigBuilder::new()
            .section_regex(SectionLabel::Education, r"\bformación\b")
            .build()
            .unwrap();
        assert!(config.section_patterns.contains_key(&SectionLabel::Education));
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new().email_regex(r"[invalid").build();
        assert!(matches!(result, Err(ConfigError::Regex(_))));
    }

    #[test]
    fn test_builder_invalid_grammar() {
        let result = ParsingConfigBuilder::new().name_grammar("NAME <NN>").build();
        assert!(matches!(result, Err(ConfigError::Grammar(_))));
    }

    #[test]
    fn test_stopword_overrides() {
        let config = ParsingConfigBuilder::new()
            .add_stopword("Resume".to_string())
            .build()
            .unwrap();
        let set = config.stopword_set();
        assert!(set.contains("resume"));
        assert!(set.contains("the"));

        let config = ParsingConfigBuilder::new()
            .set_stopwords(vec!["only".to_string()])
            .build()
            .unwrap();
        let set = config.stopword_set();
        assert_eq!(set.len(), 1);
        assert!(!set.contains("the"));
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
