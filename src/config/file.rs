//! Configuration file management for lectern.
//!
//! Loads application configuration from a TOML file in the user's config
//! directory. A missing file falls back to defaults so every command works
//! out of the box.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Top-level configuration, read from `~/.config/lectern/lectern.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LecternConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Summarization server connection settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the summarization server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request, if the server requires one
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

/// Local recording storage settings.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding recordings and their sidecars. Defaults to
    /// `$XDG_DATA_HOME/lectern/recordings` or
    /// `~/.local/share/lectern/recordings`.
    #[serde(default)]
    pub recordings_dir: Option<PathBuf>,
}

impl LecternConfig {
    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        let config = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Resolves the recordings directory, creating it if necessary.
    pub fn recordings_dir(&self) -> anyhow::Result<PathBuf> {
        let dir = match &self.storage.recordings_dir {
            Some(dir) => dir.clone(),
            None => default_recordings_dir()?,
        };
        fs::create_dir_all(&dir).map_err(|e| {
            anyhow::anyhow!("Failed to create recordings directory {}: {e}", dir.display())
        })?;
        Ok(dir)
    }
}

/// Path to the configuration file.
pub fn config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".config").join("lectern").join("lectern.toml"))
}

fn default_recordings_dir() -> anyhow::Result<PathBuf> {
    let data_dir = match std::env::var_os("XDG_DATA_HOME") {
        Some(data) => PathBuf::from(data).join("lectern"),
        None => dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            .join(".local/share/lectern"),
    };
    Ok(data_dir.join("recordings"))
}
