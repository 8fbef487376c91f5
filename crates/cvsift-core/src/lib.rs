use std::fmt;

use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;
pub mod document;
pub mod lexicon;
pub mod stopwords;

// Re-export for convenience
pub use backend::{BackendError, DocumentBackend};
pub use document::RawDocument;
pub use lexicon::{Lexicon, LexiconError, Lexicons};
pub use stopwords::ENGLISH_STOPWORDS;

/// A word token paired with its part-of-speech tag (Penn Treebank style).
///
/// Token sequences are always in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub tag: String,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// Noun or proper-noun tag (`NN`, `NNS`, `NNP`, `NNPS`).
    pub fn is_nominal(&self) -> bool {
        self.tag.contains("NN")
    }
}

impl<T: Into<String>, U: Into<String>> From<(T, U)> for Token {
    fn from((text, tag): (T, U)) -> Self {
        Token::new(text, tag)
    }
}

/// The résumé sections recognised by heading detection.
///
/// The derived `Ord` is the tie-break when two headings end at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Achievements,
    Certifications,
    Education,
    Hobbies,
    PersonalInformation,
    Projects,
    Skills,
    WorkExperience,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 8] = [
        SectionLabel::Achievements,
        SectionLabel::Certifications,
        SectionLabel::Education,
        SectionLabel::Hobbies,
        SectionLabel::PersonalInformation,
        SectionLabel::Projects,
        SectionLabel::Skills,
        SectionLabel::WorkExperience,
    ];

    /// Stable snake_case key, as used in serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Achievements => "achievements",
            Self::Certifications => "certifications",
            Self::Education => "education",
            Self::Hobbies => "hobbies",
            Self::PersonalInformation => "personal_information",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::WorkExperience => "work_experience",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A detected section heading: the byte range of the first match for `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub label: SectionLabel,
    pub start: usize,
    pub end: usize,
}

/// Half-open byte range `[start, end)` of the document assigned to one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub label: SectionLabel,
    pub start: usize,
    pub end: usize,
}

impl SectionSpan {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Slice the span out of `text`. Inverted spans yield `""`.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        if self.is_empty() {
            return "";
        }
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Fields extracted from one résumé.
///
/// Every field has a default (empty string or empty list); a heuristic that
/// finds nothing leaves its field at the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub projects: String,
    pub work_experience: String,
    pub achievements: String,
    pub certifications: String,
    pub skills_section: String,
    pub personal_information: String,
    pub hobbies: String,
    pub skills: Vec<String>,
    pub institutions: Vec<String>,
    pub organizations: Vec<String>,
}

impl ResumeFields {
    /// Section text for `label` (empty if the heading was not found).
    pub fn section(&self, label: SectionLabel) -> &str {
        match label {
            SectionLabel::Achievements => &self.achievements,
            SectionLabel::Certifications => &self.certifications,
            SectionLabel::Education => &self.education,
            SectionLabel::Hobbies => &self.hobbies,
            SectionLabel::PersonalInformation => &self.personal_information,
            SectionLabel::Projects => &self.projects,
            SectionLabel::Skills => &self.skills_section,
            SectionLabel::WorkExperience => &self.work_experience,
        }
    }

    pub fn set_section(&mut self, label: SectionLabel, text: String) {
        let slot = match label {
            SectionLabel::Achievements => &mut self.achievements,
            SectionLabel::Certifications => &mut self.certifications,
            SectionLabel::Education => &mut self.education,
            SectionLabel::Hobbies => &mut self.hobbies,
            SectionLabel::PersonalInformation => &mut self.personal_information,
            SectionLabel::Projects => &mut self.projects,
            SectionLabel::Skills => &mut self.skills_section,
            SectionLabel::WorkExperience => &mut self.work_experience,
        };
        *slot = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields_are_empty() {
        let fields = ResumeFields::default();
        assert!(fields.name.is_empty());
        assert!(fields.skills.is_empty());
        for label in SectionLabel::ALL {
            assert_eq!(fields.section(label), "");
        }
    }

    #[test]
    fn test_set_section_round_trips_through_accessor() {
        let mut fields = ResumeFields::default();
        fields.set_section(SectionLabel::Skills, " Rust, SQL".to_string());
        assert_eq!(fields.section(SectionLabel::Skills), " Rust, SQL");
        assert_eq!(fields.skills_section, " Rust, SQL");
        assert!(fields.skills.is_empty());
    }

    #[test]
    fn test_serialized_keys_are_fixed() {
        let value = serde_json::to_value(ResumeFields::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "name",
            "email",
            "phone",
            "education",
            "projects",
            "work_experience",
            "achievements",
            "certifications",
            "skills_section",
            "personal_information",
            "hobbies",
            "skills",
            "institutions",
            "organizations",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(obj["skills"].is_array());
        assert!(obj["name"].is_string());
    }

    #[test]
    fn test_label_order_is_alphabetical_by_key() {
        let mut keys: Vec<_> = SectionLabel::ALL.iter().map(|l| l.key()).collect();
        let sorted = {
            let mut k = keys.clone();
            k.sort();
            k
        };
        assert_eq!(keys, sorted);
        keys.dedup();
        assert_eq!(keys.len(), SectionLabel::ALL.len());
    }

    #[test]
    fn test_inverted_span_slices_to_empty() {
        let span = SectionSpan {
            label: SectionLabel::Projects,
            start: 10,
            end: 4,
        };
        assert_eq!(span.slice("some document text"), "");
    }

    #[test]
    fn test_token_nominal_tags() {
        assert!(Token::new("Jane", "NNP").is_nominal());
        assert!(Token::new("tools", "NNS").is_nominal());
        assert!(!Token::new("works", "VBZ").is_nominal());
    }
}
