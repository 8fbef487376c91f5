use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub lexicons: Option<LexiconsConfig>,
    pub limits: Option<LimitsConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconsConfig {
    pub skills_path: Option<String>,
    pub names_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Inputs larger than this are rejected before parsing.
    pub max_input_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `"json"` or `"text"`.
    pub format: Option<String>,
    pub color: Option<bool>,
}

/// Platform config directory path: `<config_dir>/cvsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cvsift").join("config.toml"))
}

/// Load config by cascading CWD `.cvsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".cvsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        lexicons: Some(LexiconsConfig {
            skills_path: overlay
                .lexicons
                .as_ref()
                .and_then(|l| l.skills_path.clone())
                .or_else(|| base.lexicons.as_ref().and_then(|l| l.skills_path.clone())),
            names_path: overlay
                .lexicons
                .as_ref()
                .and_then(|l| l.names_path.clone())
                .or_else(|| base.lexicons.as_ref().and_then(|l| l.names_path.clone())),
        }),
        limits: Some(LimitsConfig {
            max_input_bytes: overlay
                .limits
                .as_ref()
                .and_then(|l| l.max_input_bytes)
                .or_else(|| base.limits.as_ref().and_then(|l| l.max_input_bytes)),
        }),
        output: Some(OutputConfig {
            format: overlay
                .output
                .as_ref()
                .and_then(|o| o.format.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.format.clone())),
            color: overlay
                .output
                .as_ref()
                .and_then(|o| o.color)
                .or_else(|| base.output.as_ref().and_then(|o| o.color)),
        }),
    }
}

impl ConfigFile {
    pub fn skills_path(&self) -> Option<&str> {
        self.lexicons.as_ref()?.skills_path.as_deref()
    }

    pub fn names_path(&self) -> Option<&str> {
        self.lexicons.as_ref()?.names_path.as_deref()
    }

    pub fn max_input_bytes(&self) -> Option<u64> {
        self.limits.as_ref()?.max_input_bytes
    }

    pub fn format(&self) -> Option<&str> {
        self.output.as_ref()?.format.as_deref()
    }

    pub fn color(&self) -> Option<bool> {
        self.output.as_ref()?.color
    }
}
