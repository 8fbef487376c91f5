use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod docx;

pub use docx::read_docx;
// Re-export domain types for convenience
pub use cvsift_core::{BackendError, DocumentBackend};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction error: {0}")]
    Backend(#[from] BackendError),
    #[error("DOCX extraction error: {0}")]
    Docx(String),
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of cvsift-ingest)")]
    NoPdfSupport,
}

/// The document formats cvsift can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Pick a reader by file extension (case-insensitive):
    /// - `.pdf` → PDF (requires `pdf` feature / mupdf)
    /// - `.docx` → WordprocessingML
    /// - `.txt` → plain text
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::PlainText),
            "" => Err(IngestError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(IngestError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// Read the document at `path` as text.
    pub fn read(self, path: &Path) -> Result<String, IngestError> {
        match self {
            Self::Pdf => read_pdf(path),
            Self::Docx => read_docx(path),
            Self::PlainText => Ok(std::fs::read_to_string(path)?),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "text",
        };
        f.write_str(name)
    }
}

/// Read a résumé file into text, picking the reader from its extension.
pub fn read_document(path: &Path) -> Result<String, IngestError> {
    if !path.is_file() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }
    let kind = DocumentKind::from_path(path)?;
    tracing::debug!(path = %path.display(), %kind, "reading document");
    kind.read(path)
}

#[cfg(feature = "pdf")]
fn read_pdf(path: &Path) -> Result<String, IngestError> {
    let backend = cvsift_pdf_mupdf::MupdfBackend::default();
    Ok(backend.extract_text(path)?)
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_path: &Path) -> Result<String, IngestError> {
    Err(IngestError::NoPdfSupport)
}
