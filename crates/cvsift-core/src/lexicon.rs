use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("lexicon file {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("lexicon file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// An immutable set of lower-cased reference strings (skills or names).
///
/// Membership tests lower-case the probe, so case never matters.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from in-memory entries. Entries are trimmed and
    /// lower-cased; blank entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|e| normalize(e.as_ref()))
            .collect();
        Self { entries }
    }

    /// Load a one-entry-per-line file (the skills format).
    ///
    /// A leading byte-order mark is dropped. Invalid UTF-8 is `Malformed`.
    pub fn load_lines(path: &Path) -> Result<Self, LexiconError> {
        let file = File::open(path).map_err(|source| LexiconError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut entries = HashSet::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| read_error(path, source))?;
            let line = match index {
                0 => line.strip_prefix('\u{feff}').unwrap_or(line.as_str()),
                _ => line.as_str(),
            };
            if let Some(entry) = normalize(line) {
                entries.insert(entry);
            }
        }

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded line lexicon");
        Ok(Self { entries })
    }

    /// Load a delimited file with any number of entries per line (the names
    /// format uses `b','`).
    pub fn load_delimited(path: &Path, delimiter: u8) -> Result<Self, LexiconError> {
        let file = File::open(path).map_err(|source| LexiconError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(file);

        let mut entries = HashSet::new();
        for record in reader.records() {
            let record = record.map_err(|source| LexiconError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
            entries.extend(record.iter().filter_map(normalize));
        }

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded delimited lexicon");
        Ok(Self { entries })
    }

    pub fn contains(&self, probe: &str) -> bool {
        self.entries.contains(&probe.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_error(path: &Path, source: io::Error) -> LexiconError {
    match source.kind() {
        io::ErrorKind::InvalidData => LexiconError::Malformed {
            path: path.to_path_buf(),
            source: csv::Error::from(source),
        },
        _ => LexiconError::Unavailable {
            path: path.to_path_buf(),
            source,
        },
    }
}

fn normalize(entry: &str) -> Option<String> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// The two reference sets every parse call needs.
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Lexicons {
    pub skills: Lexicon,
    pub names: Lexicon,
}

impl Lexicons {
    pub fn new(skills: Lexicon, names: Lexicon) -> Self {
        Self { skills, names }
    }

    /// Load the skills list (one per line) and the names list (comma-delimited).
    pub fn load(skills_path: &Path, names_path: &Path) -> Result<Self, LexiconError> {
        Ok(Self {
            skills: Lexicon::load_lines(skills_path)?,
            names: Lexicon::load_delimited(names_path, b',')?,
        })
    }
}
