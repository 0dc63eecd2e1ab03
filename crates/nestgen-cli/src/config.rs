//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `NESTGEN__GENERATOR__PROGRAM=nest`,
//!    `NESTGEN__GENERATOR__ARGS="nest,--skip-import"` (comma separated)
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (`#[serde(default)]` on every section)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use nestgen_core::domain::TemplateVariant;

use crate::cli::OutputFormat;

const ENV_PREFIX: &str = "NESTGEN";

/// Application configuration.
///
/// Every section falls back to its defaults, so a file only needs the keys
/// it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How the external generator is invoked and where modules go.
    pub generator: GeneratorConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Relative to the project directory.
    pub src_dir: PathBuf,
    pub variant: TemplateVariant,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "npx".into(),
            args: vec!["nest".into()],
            src_dir: PathBuf::from("src"),
            variant: TemplateVariant::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// An explicit `--config` file must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("generator.args"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.nestgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "nestgen", "nestgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".nestgen.toml"))
    }

    /// Look up a dotted key for `nestgen config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "generator.program" => self.generator.program.clone(),
            "generator.args" => self.generator.args.join(" "),
            "generator.src_dir" => self.generator.src_dir.display().to_string(),
            "generator.variant" => self.generator.variant.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => format!("{:?}", self.output.format).to_lowercase(),
            _ => return None,
        };
        Some(value)
    }

    pub const KEYS: [&'static str; 6] = [
        "generator.program",
        "generator.args",
        "generator.src_dir",
        "generator.variant",
        "output.no_color",
        "output.format",
    ];
}
