//! Configuration file loading for membersort.
//!
//! Discovers and loads `membersort.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).
//!
//! The `[preferences]` table is owned by the preference store and is not read here.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "membersort.toml";

/// Output format of `membersort sort`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Md,
}

/// Top-level configuration from membersort.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MembersortConfig {
    pub output: OutputConfig,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,

    /// Artifact directory, relative to the project root.
    pub out_dir: Option<Utf8PathBuf>,
}

/// Path of the config file: `--config` when given, else `membersort.toml` in the root.
///
/// The file need not exist; the preference store creates it on first save.
pub fn config_path(root: &Utf8Path, explicit: Option<&Utf8Path>) -> Utf8PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => root.join(CONFIG_FILE_NAME),
    }
}

/// Load and parse a membersort.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<MembersortConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<MembersortConfig> {
    let config: MembersortConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the config, or return the default if the file does not exist.
pub fn load_or_default(path: &Utf8Path) -> anyhow::Result<MembersortConfig> {
    if path.exists() {
        debug!("found config file at {}", path);
        load_config(path)
    } else {
        debug!("no config file found at {}", path);
        Ok(MembersortConfig::default())
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    pub format: OutputFormat,
    pub out_dir: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: MembersortConfig,
}

impl ConfigMerger {
    pub fn new(config: MembersortConfig) -> Self {
        Self { config }
    }

    /// Merge with sort command CLI arguments.
    ///
    /// CLI values win. A config `out_dir` is resolved against `root`; a CLI one is used as given.
    pub fn merge_sort_args(
        self,
        root: &Utf8Path,
        cli_format: Option<OutputFormat>,
        cli_out_dir: Option<Utf8PathBuf>,
    ) -> MergedConfig {
        let format = cli_format
            .or(self.config.output.format)
            .unwrap_or_default();
        let out_dir = cli_out_dir.or_else(|| self.config.output.out_dir.map(|d| root.join(d)));
        MergedConfig { format, out_dir }
    }
}
