use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::store::DEFAULT_KEY;

/// Per-project directory holding config and the snapshot store.
pub const PROJECT_DIR: &str = ".tickets";
/// Config file name inside [`PROJECT_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
/// Subdirectory of [`PROJECT_DIR`] used by the file store.
pub const STORE_DIR: &str = "store";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the ticket snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Walk up from `start` to the first directory containing [`PROJECT_DIR`].
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Directory the file store keeps snapshots in.
#[must_use]
pub fn store_dir(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join(STORE_DIR)
}

/// Create [`PROJECT_DIR`] with a default config. Existing config is kept.
///
/// Returns `true` if the config file was written.
pub fn init_project(project_root: &Path) -> Result<bool> {
    let dir = project_root.join(PROJECT_DIR);
    std::fs::create_dir_all(dir.join(STORE_DIR))
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }

    let content = toml::to_string_pretty(&ProjectConfig::default())
        .context("Failed to serialize default config")?;
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_DIR).join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("ticketdesk/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(
    project_root: &Path,
    cli_format: Option<&str>,
    cli_json: bool,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_format,
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output: resolved_output.to_string(),
    })
}

/// Normalize an output mode name. Unknown values yield `None`.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

/// Precedence: `--format`, `--json`, `FORMAT`, user config, then TTY detection.
fn resolve_output(
    cli_format: Option<&str>,
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> &'static str {
    if let Some(mode) = cli_format.and_then(normalize_output_mode) {
        return mode;
    }

    if cli_json {
        return "json";
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode;
    }

    if is_tty { "pretty" } else { "text" }
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

const fn default_lock_timeout_ms() -> u64 {
    5_000
}
