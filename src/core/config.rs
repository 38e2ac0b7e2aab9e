use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_locale() -> String {
    "zh-TW".to_string()
}

fn default_retries() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Locale used for text collation when sorting by ticker or name.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            backend: BackendConfig::default(),
            fetch: FetchConfig::default(),
            locale: default_locale(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "etfdiff", "etfdiff")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
