use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for binary document text extraction backends (PDF today).
///
/// Implementors provide the low-level text extraction step; field extraction
/// (sections, contact details, name, skills) lives in
/// `cvsift_parsing::ResumeExtractor` and never sees the file.
pub trait DocumentBackend: Send + Sync {
    /// Extract the full text content of a document file.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
