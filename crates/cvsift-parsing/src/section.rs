use once_cell::sync::Lazy;
use regex::Regex;

use cvsift_core::{Anchor, RawDocument, SectionLabel, SectionSpan};

use crate::config::ParsingConfig;

static ACHIEVEMENTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:achievements|accomplishments)\b").unwrap());
static CERTIFICATIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcertifications?\b").unwrap());
static EDUCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:education|graduation|qualifications?)\b").unwrap());
static HOBBIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:hobbies|interests)\b").unwrap());
static PERSONAL_INFORMATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:personal\s+information|about\s+me)\b").unwrap());
static PROJECTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bprojects?\b").unwrap());
static SKILLS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bskills\b").unwrap());
static WORK_EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:work\s+experience|work\s+history|professional\s+engagement)\b").unwrap()
});

/// Built-in heading pattern for `label`, written against lower-cased text.
pub fn default_heading_pattern(label: SectionLabel) -> &'static Regex {
    match label {
        SectionLabel::Achievements => &ACHIEVEMENTS_RE,
        SectionLabel::Certifications => &CERTIFICATIONS_RE,
        SectionLabel::Education => &EDUCATION_RE,
        SectionLabel::Hobbies => &HOBBIES_RE,
        SectionLabel::PersonalInformation => &PERSONAL_INFORMATION_RE,
        SectionLabel::Projects => &PROJECTS_RE,
        SectionLabel::Skills => &SKILLS_RE,
        SectionLabel::WorkExperience => &WORK_EXPERIENCE_RE,
    }
}

fn heading_pattern(label: SectionLabel, config: &ParsingConfig) -> &Regex {
    config
        .section_patterns
        .get(&label)
        .unwrap_or_else(|| default_heading_pattern(label))
}

/// Locate section headings in the document.
///
/// Only the first occurrence of each label is kept; later repeats of the same
/// heading are ignored. Anchors come back sorted by `(end, label)`.
pub fn find_anchors(doc: &RawDocument) -> Vec<Anchor> {
    find_anchors_with_config(doc, &ParsingConfig::default())
}

/// Config-aware version of [`find_anchors`].
pub(crate) fn find_anchors_with_config(doc: &RawDocument, config: &ParsingConfig) -> Vec<Anchor> {
    let folded = doc.folded();

    let mut anchors: Vec<Anchor> = SectionLabel::ALL
        .iter()
        .filter_map(|&label| {
            heading_pattern(label, config).find(folded).map(|m| Anchor {
                label,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect();

    anchors.sort_by_key(|a| (a.end, a.label));
    anchors
}

/// Turn sorted anchors into section spans.
///
/// Each section runs from the end of its heading to the start of the next
/// heading; the last one runs to `doc_len`. A heading that starts before the
/// previous one ends (overlapping matches) leaves the previous section empty.
pub fn section_spans(anchors: &[Anchor], doc_len: usize) -> Vec<SectionSpan> {
    anchors
        .iter()
        .enumerate()
        .map(|(i, anchor)| {
            let end = anchors.get(i + 1).map_or(doc_len, |next| next.start);
            SectionSpan {
                label: anchor.label,
                start: anchor.end,
                end: end.max(anchor.end),
            }
        })
        .collect()
}

/// Split a document into labeled sections, in document order.
///
/// Labels whose heading is absent are not returned.
pub fn segment_sections(text: &str) -> Vec<(SectionLabel, String)> {
    segment_sections_with_config(&RawDocument::new(text), &ParsingConfig::default())
}

/// Config-aware version of [`segment_sections`].
pub(crate) fn segment_sections_with_config(
    doc: &RawDocument,
    config: &ParsingConfig,
) -> Vec<(SectionLabel, String)> {
    let anchors = find_anchors_with_config(doc, config);
    tracing::debug!(anchors = anchors.len(), "section headings found");

    section_spans(&anchors, doc.len())
        .into_iter()
        .map(|span| (span.label, span.slice(doc.text()).to_string()))
        .collect()
}
