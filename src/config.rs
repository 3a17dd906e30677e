//! Client configuration stored in ~/.breakwell/config.json
//!
//! Holds the backend base URL, the canonical request timeout, and the
//! user id attached to check-in and break requests. A missing file yields
//! the defaults; `BREAKWELL_API_URL` overrides the base URL either way.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Canonical request timeout, in seconds. The client uses one value for
/// every request; per-call overrides are deliberately not supported.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const BASE_URL_ENV: &str = "BREAKWELL_API_URL";

/// Configuration stored in ~/.breakwell/config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_id() -> String {
    "default_user".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            user_id: default_user_id(),
        }
    }
}

/// Get the canonical config file path (~/.breakwell/config.json)
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ClientError::Config("could not find home directory".to_string()))?;
    Ok(home.join(".breakwell").join("config.json"))
}

/// Get the state directory (~/.breakwell), creating it if needed.
pub fn state_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ClientError::Config("could not find home directory".to_string()))?;
    let dir = home.join(".breakwell");
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .map_err(|e| ClientError::Config(format!("failed to create state dir: {}", e)))?;
    }
    Ok(dir)
}

/// Load configuration from disk, falling back to defaults when the file
/// does not exist. A present-but-unparseable file is an error so a typo
/// is not silently replaced with defaults.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    let mut config = if path.exists() {
        let content = fs::read_to_string(&path)
            .map_err(|e| ClientError::Config(format!("failed to read config: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse config: {}", e)))?
    } else {
        Config::default()
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.api_base_url = url.trim().to_string();
        }
    }

    Ok(config)
}

/// Write config to ~/.breakwell/config.json, creating the directory.
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::Config(format!("failed to create config dir: {}", e)))?;
        }
    }
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    fs::write(&path, content)
        .map_err(|e| ClientError::Config(format!("failed to write config: {}", e)))?;
    Ok(())
}
