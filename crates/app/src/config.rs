//! Application configuration
//!
//! Loaded from `config.toml` in the platform config directory (or an
//! explicit `--config` path), then overridden from the environment.
//! Every field has a default, so an absent file is not an error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Real backend base URL; used for `/auth/login` and, with the mock off, all resources
    pub api_base_url: String,
    /// Origin that relative, non-mocked URLs resolve against
    pub origin: String,
    pub mock: MockConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub enabled: bool,
    pub prefix: String,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8081/api".to_string(),
            origin: "http://localhost:8080".to_string(),
            mock: MockConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: bookfair_net::DEFAULT_PREFIX.to_string(),
            latency_ms: bookfair_net::DEFAULT_LATENCY.as_millis() as u64,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: bookfair_net::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Config loaded");
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `BOOKFAIR_*` overrides looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BOOKFAIR_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(origin) = lookup("BOOKFAIR_ORIGIN") {
            self.origin = origin;
        }
        if let Some(value) = lookup("BOOKFAIR_MOCK") {
            self.mock.enabled = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "BOOKFAIR_MOCK",
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup("BOOKFAIR_MOCK_LATENCY_MS") {
            self.mock.latency_ms = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BOOKFAIR_MOCK_LATENCY_MS",
                value,
            })?;
        }
        if let Some(value) = lookup("BOOKFAIR_PORT") {
            self.server.port = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BOOKFAIR_PORT",
                value,
            })?;
        }
        Ok(())
    }

    /// Base URL for resource endpoints: the mock prefix when mocking, else the backend
    pub fn resource_base(&self) -> String {
        if self.mock.enabled {
            self.mock.prefix.trim_end_matches('/').to_string()
        } else {
            self.api_base_url.trim_end_matches('/').to_string()
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("lk", "bookfair", "bookfair-admin")
}

fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
