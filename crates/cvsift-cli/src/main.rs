use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cvsift_core::config_file::{self, ConfigFile};
use cvsift_parsing::{Lexicons, ResumeExtractor, ResumeFields};

mod output;

use output::{ColorMode, ParsedFile};

const DEFAULT_SKILLS_PATH: &str = "skills_db.csv";
const DEFAULT_NAMES_PATH: &str = "dataset/names.csv";
const DEFAULT_MAX_INPUT_BYTES: u64 = 2 * 1024 * 1024;

/// cvsift - Pull names, contact details, sections and skills out of résumés
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log pipeline steps to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract fields from one or more PDF, DOCX or plain-text résumés
    Parse {
        /// Files to parse
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Skills lexicon, one entry per line
        #[arg(long)]
        skills: Option<PathBuf>,

        /// Names lexicon, comma-separated
        #[arg(long)]
        names: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Reject inputs larger than this many bytes
        #[arg(long)]
        max_input_bytes: Option<u64>,
    },

    /// Print the platform config file location
    ConfigPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn from_config(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Fully resolved settings for a `parse` run.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    skills_path: PathBuf,
    names_path: PathBuf,
    format: OutputFormat,
    color: bool,
    max_input_bytes: u64,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::ConfigPath => {
            match config_file::config_path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("no config directory on this platform"),
            }
            Ok(())
        }
        Command::Parse {
            files,
            skills,
            names,
            format,
            output,
            no_color,
            max_input_bytes,
        } => {
            let config = config_file::load_config();
            let settings = resolve_settings(
                &config,
                skills,
                names,
                format,
                no_color,
                output.is_some(),
                max_input_bytes,
            );
            parse(&files, &settings, output.as_deref())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// First of: CLI flag, environment variable, config file, built-in default.
fn resolve_path(
    flag: Option<PathBuf>,
    env_var: &str,
    configured: Option<&str>,
    default: &str,
) -> PathBuf {
    flag.or_else(|| std::env::var_os(env_var).map(PathBuf::from))
        .or_else(|| configured.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

fn resolve_settings(
    config: &ConfigFile,
    skills: Option<PathBuf>,
    names: Option<PathBuf>,
    format: Option<OutputFormat>,
    no_color: bool,
    to_file: bool,
    max_input_bytes: Option<u64>,
) -> Settings {
    let format = format
        .or_else(|| {
            let configured = config.format()?;
            let parsed = OutputFormat::from_config(configured);
            if parsed.is_none() {
                tracing::warn!(format = configured, "unknown output format in config, using json");
            }
            parsed
        })
        .unwrap_or(OutputFormat::Json);

    Settings {
        skills_path: resolve_path(
            skills,
            "CVSIFT_SKILLS_PATH",
            config.skills_path(),
            DEFAULT_SKILLS_PATH,
        ),
        names_path: resolve_path(
            names,
            "CVSIFT_NAMES_PATH",
            config.names_path(),
            DEFAULT_NAMES_PATH,
        ),
        format,
        color: !no_color && !to_file && config.color().unwrap_or(true),
        max_input_bytes: max_input_bytes
            .or_else(|| config.max_input_bytes())
            .unwrap_or(DEFAULT_MAX_INPUT_BYTES),
    }
}

fn parse(files: &[PathBuf], settings: &Settings, output: Option<&Path>) -> anyhow::Result<()> {
    // Lexicons are required for every file; fail before touching any input.
    let lexicons = Lexicons::load(&settings.skills_path, &settings.names_path)
        .context("failed to load lexicons")?;
    tracing::debug!(
        skills = lexicons.skills.len(),
        names = lexicons.names.len(),
        "lexicons loaded"
    );

    let color = ColorMode(settings.color);
    let mut writer: Box<dyn Write> = if let Some(output_path) = output {
        Box::new(
            std::fs::File::create(output_path)
                .with_context(|| format!("cannot create {}", output_path.display()))?,
        )
    } else {
        Box::new(std::io::stdout())
    };
    let mut stderr = std::io::stderr();

    let extractor = ResumeExtractor::new();
    let mut parsed: Vec<(String, ResumeFields)> = Vec::new();
    let mut failures = 0usize;

    for path in files {
        let file_name = path.display().to_string();
        match parse_file(&extractor, &lexicons, path, settings.max_input_bytes) {
            Ok(fields) => {
                if settings.format == OutputFormat::Text {
                    output::print_file_header(&mut writer, &file_name, color)?;
                    output::print_fields(&mut writer, &fields, color)?;
                }
                parsed.push((file_name, fields));
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(file = %file_name, error = %e, "skipping file");
                output::print_failure(&mut stderr, &file_name, &e, color)?;
            }
        }
    }

    if settings.format == OutputFormat::Json {
        match parsed.as_slice() {
            [] => {}
            [(_, fields)] if files.len() == 1 => output::write_json(&mut writer, fields)?,
            _ => {
                let tagged: Vec<ParsedFile<'_>> = parsed
                    .iter()
                    .map(|(file, fields)| ParsedFile {
                        file: file.clone(),
                        fields,
                    })
                    .collect();
                output::write_json_many(&mut writer, &tagged)?;
            }
        }
    }
    writer.flush()?;

    if failures > 0 {
        anyhow::bail!("{} of {} files could not be parsed", failures, files.len());
    }
    Ok(())
}

/// Read, size-check and parse one file.
fn parse_file(
    extractor: &ResumeExtractor,
    lexicons: &Lexicons,
    path: &Path,
    max_input_bytes: u64,
) -> anyhow::Result<ResumeFields> {
    if let Ok(meta) = std::fs::metadata(path)
        && meta.len() > max_input_bytes
    {
        anyhow::bail!(
            "file is {} bytes, over the {} byte limit",
            meta.len(),
            max_input_bytes
        );
    }

    let text = cvsift_ingest::read_document(path)?;
    // Compressed formats can expand well past their size on disk.
    if text.len() as u64 > max_input_bytes {
        anyhow::bail!(
            "extracted text is {} bytes, over the {} byte limit",
            text.len(),
            max_input_bytes
        );
    }

    Ok(extractor.parse(&text, lexicons)?)
}
