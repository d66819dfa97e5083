//! Configuration system for peerchat-web
//!
//! Reads config from ~/.config/peerchat-web/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ws_port: u16,
    pub http_port: u16,
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ws_port: 9100,
            http_port: 8088,
            bind: "127.0.0.1".to_string(),
        }
    }
}

/// Peer connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Port tried when a peer address carries no explicit port.
    pub default_port: u16,
    pub connect_timeout_secs: u64,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            default_port: 42800,
            connect_timeout_secs: 5,
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub peer: PeerConfig,
    /// Overrides the settings.json location; mostly for portable installs.
    pub settings_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path. A missing file means
    /// defaults; an unparsable file is an error.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_config_path())
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("peerchat-web")
            .join("config.toml")
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Create default config file if it doesn't exist
    pub fn create_default_if_missing() {
        let path = Self::default_config_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let default_config = r#"# peerchat-web Configuration

# Uncomment to keep the settings document somewhere else:
# settings_path = "/path/to/settings.json"

[server]
ws_port = 9100
http_port = 8088
bind = "127.0.0.1"

[peer]
default_port = 42800
connect_timeout_secs = 5
"#;
            let _ = std::fs::write(&path, default_config);
        }
    }
}
