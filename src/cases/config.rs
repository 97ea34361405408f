//! Configuration primitives for forensicbase workspaces.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/ForensicBase/config/config.toml on Windows
//!   $XDG_DATA_HOME/ForensicBase/config/config.toml on Linux
//!   ~/Library/Application Support/ForensicBase/config/config.toml on macOS
//!
//! The config tracks the last active case and per-install loader and
//! analysis preferences.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Identifier of the case that was active when the tool last ran.
    pub last_active_case_id: Option<String>,
    /// Loader strictness knobs.
    #[serde(default)]
    pub ingestion: LoaderSettings,
    /// Defaults for the analyze driver.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Loader preferences tied to the local install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Whether duplicated names in a case file abort the load instead of
    /// being silently ignored.
    #[serde(default = "default_reject_duplicates")]
    pub reject_duplicate_names: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            reject_duplicate_names: default_reject_duplicates(),
        }
    }
}

const fn default_reject_duplicates() -> bool {
    false
}

/// Analysis defaults that affect the analyze driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Whether unmarked profiles are purged after flagging by default.
    #[serde(default = "default_purge_unmarked")]
    pub purge_unmarked: bool,
    /// Whether a JSON report is written after each run by default.
    #[serde(default = "default_write_report")]
    pub write_report: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            purge_unmarked: default_purge_unmarked(),
            write_report: default_write_report(),
        }
    }
}

const fn default_purge_unmarked() -> bool {
    false
}

const fn default_write_report() -> bool {
    true
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Returns the root directory where forensicbase stores data.
///
/// Order of precedence:
/// 1. `FORENSICBASE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("FORENSICBASE_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("ForensicBase"))
}

/// Returns the config directory under the workspace root.
pub fn config_dir() -> Result<PathBuf> {
    let root = workspace_root()?;
    Ok(root.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}

/// Ensures the workspace structure exists (cases/ directory).
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let root = workspace_root()?;
    let cases_dir = root.join("cases");
    fs::create_dir_all(&cases_dir)?;
    Ok(WorkspacePaths { root, cases_dir })
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub cases_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn case_dir(&self, slug: &str) -> PathBuf {
        self.cases_dir.join(slug)
    }
}
