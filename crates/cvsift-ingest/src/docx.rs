//! Plain-text extraction from WordprocessingML (`.docx`) files.
//!
//! A `.docx` file is a zip container; the body lives in
//! `word/document.xml`:
//! ```xml
//! <w:document>
//!   <w:body>
//!     <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
//!     <w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust</w:t></w:r></w:p>
//!   </w:body>
//! </w:document>
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::IngestError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the body text of a `.docx` file, one line per paragraph.
pub fn read_docx(path: &Path) -> Result<String, IngestError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| IngestError::Docx(format!("not a zip container: {e}")))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| IngestError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    let text = document_text(BufReader::new(part))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "docx text extracted");
    Ok(text)
}

/// Walk `word/document.xml`, keeping `w:t` text; tabs become spaces, and
/// paragraph ends and line breaks become newlines.
///
/// Only `w:tab`/`w:br`/`w:cr` inside a run (`w:r`) count; the `w:tab`
/// elements under `w:pPr/w:tabs` define tab stops and carry no text.
pub fn document_text<R: BufRead>(reader: R) -> Result<String, IngestError> {
    let mut xml_reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;
    let mut in_run = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                b"w:tab" if in_run => out.push(' '),
                b"w:br" | b"w:cr" if in_run => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" if in_run => out.push(' '),
                b"w:br" | b"w:cr" if in_run => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| IngestError::Docx(err.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(IngestError::Docx(format!(
                    "malformed XML at byte {}: {e}",
                    xml_reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
