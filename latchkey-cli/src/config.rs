//! CLI configuration handling.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where secrets are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The platform keyring; falls back to memory when unavailable.
    #[default]
    Keyring,

    /// Process memory only. Nothing persists.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Secret storage backend.
    pub backend: BackendKind,

    /// Prefix for keyring entries.
    pub namespace: String,

    /// Logging level, used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Path to the configuration file that was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            namespace: "latchkey".to_string(),
            log_level: "info".to_string(),
            config_path: None,
        }
    }
}

/// Load configuration from `explicit`, or from the default location.
///
/// A missing default file yields defaults; an explicit path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<CliConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file {:?} does not exist", path);
            }
            load_config_from(path)
        }
        None => match default_config_path() {
            Some(path) if path.exists() => load_config_from(&path),
            _ => Ok(CliConfig::default()),
        },
    }
}

/// Parse the configuration file at `path`.
pub fn load_config_from(path: &Path) -> Result<CliConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let mut config: CliConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config from {:?}", path))?;

    config.config_path = Some(path.to_path_buf());
    Ok(config)
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "latchkey", "latchkey")
}
