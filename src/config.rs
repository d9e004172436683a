//! Configuration for claimlens.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CLAIMLENS_API_URL, CLAIMLENS_HOME)
//! 2. Config file (.claimlens/config.yaml)
//! 3. Defaults (http://localhost:5000, ~/.claimlens)
//!
//! Config file discovery:
//! - Searches current directory and parents for .claimlens/config.yaml
//! - The home path in the config file is relative to the .claimlens/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub default_lang: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// State directory (relative to the config file's directory)
    pub home: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Backend base URL
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Default language hint sent with verification requests
    pub default_lang: Option<String>,
    /// Absolute path to claimlens home (state)
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl ResolvedConfig {
    /// Where verification history is persisted.
    pub fn history_path(&self) -> PathBuf {
        self.home.join("history.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".claimlens").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".claimlens");

    let config_file = find_config_file();
    let parsed = match &config_file {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };

    let api_url = if let Ok(env_url) = std::env::var("CLAIMLENS_API_URL") {
        env_url
    } else {
        parsed
            .as_ref()
            .and_then(|c| c.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    };

    let home = if let Ok(env_home) = std::env::var("CLAIMLENS_HOME") {
        PathBuf::from(env_home)
    } else if let (Some(config_path), Some(home_path)) = (
        &config_file,
        parsed.as_ref().and_then(|c| c.paths.home.as_ref()),
    ) {
        let claimlens_dir = config_path.parent().unwrap_or(Path::new("."));
        resolve_path(claimlens_dir, home_path)
    } else {
        default_home
    };

    let timeout_seconds = parsed
        .as_ref()
        .and_then(|c| c.api.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let default_lang = parsed.as_ref().and_then(|c| c.api.default_lang.clone());

    Ok(ResolvedConfig {
        api_url,
        timeout: Duration::from_secs(timeout_seconds),
        default_lang,
        home,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
