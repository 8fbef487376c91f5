use std::path::Path;

use thiserror::Error;

pub mod affiliations;
pub mod config;
pub mod contact;
pub mod extractor;
pub mod name;
pub mod nlp;
pub mod section;
pub mod skills;

pub use config::{ConfigError, ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::ResumeExtractor;
pub use nlp::{HeuristicTagger, PosTagger, TaggerError};
// Re-export domain types from core (canonical definitions live there)
pub use cvsift_core::{Lexicon, LexiconError, Lexicons, ResumeFields, SectionLabel, Token};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("part-of-speech tagging failed: {0}")]
    Tagger(#[from] TaggerError),
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

/// Extract résumé fields from plain text with the default extractor.
///
/// Pipeline:
/// 1. Find the email address and phone number
/// 2. Locate section headings and slice the sections between them
/// 3. Tokenize and tag; pick the first known given name from noun chunks
/// 4. Match words and short phrases against the skills lexicon
/// 5. Collect institution and organisation lines
pub fn parse_resume(text: &str, lexicons: &Lexicons) -> Result<ResumeFields, ParsingError> {
    ResumeExtractor::new().parse(text, lexicons)
}

/// Like [`parse_resume`], loading both lexicons from disk first.
///
/// Prefer loading [`Lexicons`] once and calling [`parse_resume`] when parsing
/// more than one document.
pub fn parse_resume_with_lexicon_files(
    text: &str,
    skills_path: &Path,
    names_path: &Path,
) -> Result<ResumeFields, ParsingError> {
    let lexicons = Lexicons::load(skills_path, names_path)?;
    parse_resume(text, &lexicons)
}
