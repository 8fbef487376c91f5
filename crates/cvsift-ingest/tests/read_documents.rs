use std::fs::File;
use std::io::Write;
use std::path::Path;

use cvsift_ingest::{DocumentKind, IngestError, read_document};
use zip::write::SimpleFileOptions;

const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">jane@example.com </w:t></w:r><w:r><w:t>9876543210</w:t></w:r></w:p>
    <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
    <w:p><w:r><w:t>Python</w:t><w:tab/><w:t>SQL</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

fn write_docx(path: &Path, parts: &[(&str, &str)]) -> anyhow::Result<()> {
    let mut writer = zip::ZipWriter::new(File::create(path)?);
    for (name, body) in parts {
        writer.start_file(*name, SimpleFileOptions::default())?;
        writer.write_all(body.as_bytes())?;
    }
    writer.finish()?;
    Ok(())
}

#[test]
fn test_docx_paragraph_text() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("resume.docx");
    write_docx(
        &path,
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", DOCUMENT_XML),
        ],
    )?;

    let text = read_document(&path)?;
    assert_eq!(
        text,
        "Jane Doe\njane@example.com 9876543210\nSkills\nPython SQL\n"
    );
    Ok(())
}

#[test]
fn test_docx_without_document_part() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.docx");
    write_docx(&path, &[("[Content_Types].xml", "<Types/>")])?;

    assert!(matches!(read_document(&path), Err(IngestError::Docx(_))));
    Ok(())
}

#[test]
fn test_docx_that_is_not_a_zip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fake.docx");
    std::fs::write(&path, "plain words, not a zip")?;

    assert!(matches!(read_document(&path), Err(IngestError::Docx(_))));
    Ok(())
}

#[test]
fn test_plain_text() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("resume.TXT");
    std::fs::write(&path, "Jane Doe\nEducation\nXYZ University\n")?;

    assert_eq!(DocumentKind::from_path(&path)?, DocumentKind::PlainText);
    assert_eq!(read_document(&path)?, "Jane Doe\nEducation\nXYZ University\n");
    Ok(())
}

#[test]
fn test_unsupported_extension_on_existing_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("resume.rtf");
    std::fs::write(&path, "{\\rtf1 Jane}")?;

    let err = read_document(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(ref ext) if ext == ".rtf"));
    Ok(())
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_document(&dir.path().join("gone.docx")).unwrap_err();
    assert!(matches!(err, IngestError::NotFound(_)));
}
