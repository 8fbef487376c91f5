use cvsift_core::{Lexicons, RawDocument, ResumeFields, Token};

use crate::config::ParsingConfig;
use crate::nlp::{HeuristicTagger, PosTagger, TaggerError, word_tokenize};
use crate::{ParsingError, affiliations, contact, name, section, skills};

/// Config-driven résumé field extractor.
///
/// Holds a [`ParsingConfig`] and a part-of-speech tagger and exposes the
/// full pipeline through [`parse`](Self::parse). Holds no per-call state, so
/// one extractor can serve many threads.
pub struct ResumeExtractor {
    config: ParsingConfig,
    tagger: Box<dyn PosTagger>,
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResumeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResumeExtractor {
    /// Create an extractor with default configuration and the heuristic tagger.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self {
            config,
            tagger: Box::new(HeuristicTagger),
        }
    }

    /// Swap in a different part-of-speech tagger.
    pub fn with_tagger(mut self, tagger: Box<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Tag `tokens`, checking that the tagger kept one tag per token.
    pub fn tag(&self, tokens: &[String]) -> Result<Vec<Token>, TaggerError> {
        let tagged = self.tagger.tag(tokens)?;
        if tagged.len() != tokens.len() {
            return Err(TaggerError::LengthMismatch {
                expected: tokens.len(),
                got: tagged.len(),
            });
        }
        Ok(tagged)
    }

    /// Extract every field from one résumé's text.
    ///
    /// Pipeline:
    /// 1. Email and phone by pattern search
    /// 2. Section headings, sliced into labeled sections
    /// 3. Tokenize and tag; first known given name inside a noun chunk
    /// 4. Skills by lexicon lookup over words and short phrases
    /// 5. Institution and organisation lines
    ///
    /// Blank input returns the default record. A heuristic that finds nothing
    /// leaves its field empty; only a tagger failure is an error.
    pub fn parse(&self, text: &str, lexicons: &Lexicons) -> Result<ResumeFields, ParsingError> {
        let doc = RawDocument::new(text);
        if doc.is_blank() {
            tracing::debug!("blank input, returning empty record");
            return Ok(ResumeFields::default());
        }

        let mut fields = ResumeFields {
            email: contact::extract_email_with_config(text, &self.config),
            phone: contact::extract_phone_with_config(text, &self.config),
            ..ResumeFields::default()
        };

        for (label, body) in section::segment_sections_with_config(&doc, &self.config) {
            fields.set_section(label, body);
        }

        let tokens = word_tokenize(text);
        let tagged = self.tag(&tokens)?;
        let name = name::extract_name_with_config(&tagged, &lexicons.names, &self.config);
        tracing::debug!(hit = name.is_some(), "name lookup");
        fields.name = name.unwrap_or_default();

        fields.skills = skills::extract_skills_with_config(&tokens, &lexicons.skills, &self.config);
        fields.institutions = affiliations::extract_institutions_with_config(text, &self.config);
        fields.organizations = affiliations::extract_organizations_with_config(text, &self.config);

        tracing::debug!(
            tokens = tokens.len(),
            skills = fields.skills.len(),
            has_email = !fields.email.is_empty(),
            has_phone = !fields.phone.is_empty(),
            "resume parsed"
        );
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvsift_core::Lexicon;

    fn lexicons() -> Lexicons {
        Lexicons::new(
            Lexicon::from_entries(["python", "sql"]),
            Lexicon::from_entries(["jane"]),
        )
    }

    struct ShortTagger;

    impl PosTagger for ShortTagger {
        fn tag(&self, _tokens: &[String]) -> Result<Vec<Token>, TaggerError> {
            Ok(vec![Token::new("x", "NN")])
        }
    }

    #[test]
    fn test_blank_input_is_default_record() {
        let extractor = ResumeExtractor::new();
        for text in ["", "   \n\t ", "\n--\n"] {
            assert_eq!(
                extractor.parse(text, &lexicons()).unwrap(),
                ResumeFields::default()
            );
        }
    }

    #[test]
    fn test_blank_input_skips_tagger() {
        let extractor = ResumeExtractor::new().with_tagger(Box::new(ShortTagger));
        assert!(extractor.parse("  ", &lexicons()).is_ok());
    }

    #[test]
    fn test_tagger_length_mismatch_is_error() {
        let extractor = ResumeExtractor::new().with_tagger(Box::new(ShortTagger));
        let err = extractor.parse("Jane Doe knows Python", &lexicons()).unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Tagger(TaggerError::LengthMismatch { expected: 4, got: 1 })
        ));
    }

    #[test]
    fn test_fields_merged() {
        let text = "Jane Doe\njane@example.com\nSkills\nPython";
        let fields = ResumeExtractor::new().parse(text, &lexicons()).unwrap();
        assert_eq!(fields.name, "Jane");
        assert_eq!(fields.email, "jane@example.com");
        assert_eq!(fields.phone, "");
        assert_eq!(fields.skills_section, "\nPython");
        assert_eq!(fields.skills, vec!["Python"]);
    }
}
