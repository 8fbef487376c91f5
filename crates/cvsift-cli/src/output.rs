use std::io::Write;

use cvsift_parsing::{ResumeFields, SectionLabel};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// One parsed file, as written in multi-file JSON output.
#[derive(Debug, Serialize)]
pub struct ParsedFile<'a> {
    pub file: String,
    #[serde(flatten)]
    pub fields: &'a ResumeFields,
}

/// Section excerpts longer than this are cut in text output.
const EXCERPT_CHARS: usize = 300;

/// Write one record as pretty JSON.
pub fn write_json(w: &mut dyn Write, fields: &ResumeFields) -> anyhow::Result<()> {
    writeln!(w, "{}", serde_json::to_string_pretty(fields)?)?;
    Ok(())
}

/// Write several records as a pretty JSON array, each tagged with its file.
pub fn write_json_many(w: &mut dyn Write, files: &[ParsedFile<'_>]) -> anyhow::Result<()> {
    writeln!(w, "{}", serde_json::to_string_pretty(files)?)?;
    Ok(())
}

/// Print the header line for one input file.
pub fn print_file_header(w: &mut dyn Write, file_name: &str, color: ColorMode) -> std::io::Result<()> {
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold().cyan())?;
        writeln!(w, "{}", file_name.bold())?;
        writeln!(w, "{}", sep.bold().cyan())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "{}", file_name)?;
        writeln!(w, "{}", sep)?;
    }
    Ok(())
}

/// Print the extracted fields as labeled text.
pub fn print_fields(w: &mut dyn Write, fields: &ResumeFields, color: ColorMode) -> std::io::Result<()> {
    print_scalar(w, "Name", &fields.name, color)?;
    print_scalar(w, "Email", &fields.email, color)?;
    print_scalar(w, "Phone", &fields.phone, color)?;
    writeln!(w)?;

    print_list(w, "Skills", &fields.skills, color)?;
    print_list(w, "Institutions", &fields.institutions, color)?;
    print_list(w, "Organizations", &fields.organizations, color)?;

    for label in SectionLabel::ALL {
        let body = fields.section(label).trim();
        if body.is_empty() {
            continue;
        }
        writeln!(w)?;
        let title = section_title(label);
        if color.enabled() {
            writeln!(w, "{}:", title.bold())?;
        } else {
            writeln!(w, "{}:", title)?;
        }
        for line in excerpt(body, EXCERPT_CHARS).lines() {
            writeln!(w, "  {}", line)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print a per-file failure without aborting the run.
pub fn print_failure(
    w: &mut dyn Write,
    file_name: &str,
    error: &anyhow::Error,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}: {:#}", "ERROR:".red().bold(), file_name, error)
    } else {
        writeln!(w, "ERROR: {}: {:#}", file_name, error)
    }
}

fn print_scalar(w: &mut dyn Write, label: &str, value: &str, color: ColorMode) -> std::io::Result<()> {
    match (value.is_empty(), color.enabled()) {
        (true, true) => writeln!(w, "{:<8} {}", format!("{label}:").bold(), "(not found)".dimmed()),
        (true, false) => writeln!(w, "{:<8} (not found)", format!("{label}:")),
        (false, true) => writeln!(w, "{:<8} {}", format!("{label}:").bold(), value.green()),
        (false, false) => writeln!(w, "{:<8} {}", format!("{label}:"), value),
    }
}

fn print_list(w: &mut dyn Write, label: &str, items: &[String], color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} ({})", label.bold(), items.len())?;
    } else {
        writeln!(w, "{} ({})", label, items.len())?;
    }
    for item in items {
        if color.enabled() {
            writeln!(w, "  - {}", item.cyan())?;
        } else {
            writeln!(w, "  - {}", item)?;
        }
    }
    Ok(())
}

fn section_title(label: SectionLabel) -> &'static str {
    match label {
        SectionLabel::Achievements => "Achievements",
        SectionLabel::Certifications => "Certifications",
        SectionLabel::Education => "Education",
        SectionLabel::Hobbies => "Hobbies",
        SectionLabel::PersonalInformation => "Personal information",
        SectionLabel::Projects => "Projects",
        SectionLabel::Skills => "Skills section",
        SectionLabel::WorkExperience => "Work experience",
    }
}

/// First `max_chars` characters of `text`, with `...` if anything was cut.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
