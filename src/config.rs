use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourceConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Wraps commands of entries flagged `Terminal=true`, e.g. `"foot -e"`.
    #[serde(default)]
    pub terminal: Option<String>,
    /// Opens deep links that do not name a receiving application.
    #[serde(default = "default_opener")]
    pub opener: String,
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
}

fn default_opener() -> String { "xdg-open".to_string() }
fn default_icon_size() -> u32 { 32 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            terminal: None,
            opener: default_opener(),
            icon_size: default_icon_size(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_true")]
    pub scan_desktop: bool,
    #[serde(default = "default_true")]
    pub custom_launchables: bool,
    /// Searched after the standard XDG application directories.
    #[serde(default)]
    pub application_dirs: Vec<PathBuf>,
}

fn default_true() -> bool { true }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            scan_desktop: true,
            custom_launchables: true,
            application_dirs: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchConfig {
    /// Cap on installed-app matches; shortcut entries come on top.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize { 20 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: default_max_results() }
    }
}

pub fn default_config_path() -> PathBuf {
    match ProjectDirs::from("org", "launchables", "launchables") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

/// Reads `path`, or the per-user config file when `None`. A missing file
/// yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        log::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(config)
}
