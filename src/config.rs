/// Application configuration
///
/// Layered with figment, lowest priority first:
/// 1. Built-in defaults (backend at http://localhost:8000)
/// 2. User config file:
///    - Linux: ~/.config/rag-assistant/config.toml
///    - macOS: ~/Library/Application Support/rag-assistant/config.toml
///    - Windows: %APPDATA%\rag-assistant\config.toml
/// 3. Environment variables prefixed with `RAG_ASSISTANT_`
///    (e.g. `RAG_ASSISTANT_API_BASE=http://10.0.0.5:8000`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of environment variables that override config keys
const ENV_PREFIX: &str = "RAG_ASSISTANT_";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend origin every API path is joined onto
    pub api_base: String,
    /// How long a toast stays on screen
    pub toast_timeout_secs: u64,
    /// Maximum number of toasts shown at once
    pub max_toasts: usize,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            toast_timeout_secs: 4,
            max_toasts: 5,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from defaults, the user config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::user_config_path().as_deref())
    }

    /// Load with an explicit config file (skipped when absent) and the environment
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::extract(Self::file_layers(file).merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Defaults plus the config file, without the environment layer
    fn file_layers(file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Config::default()));

        match file.filter(|p| p.exists()) {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment,
        }
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Get the path where the user config file lives
    fn user_config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("rag-assistant");
        path.push("config.toml");
        Some(path)
    }

    pub fn toast_timeout(&self) -> Duration {
        Duration::from_secs(self.toast_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rag-assistant-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.toast_timeout(), Duration::from_secs(4));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let figment = Config::file_layers(Some(Path::new("/nonexistent/rag-assistant.toml")));
        let config = Config::extract(figment).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = scratch_file(
            "override.toml",
            "api_base = \"http://rag.internal:9000\"\ntoast_timeout_secs = 10\n",
        );

        let config = Config::extract(Config::file_layers(Some(&path))).unwrap();

        assert_eq!(config.api_base, "http://rag.internal:9000");
        assert_eq!(config.toast_timeout_secs, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_bad_file_is_error() {
        let path = scratch_file("bad.toml", "toast_timeout_secs = \"soon\"\n");

        assert!(Config::extract(Config::file_layers(Some(&path))).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("config.toml", "api_base = \"http://from-file:9000\"\nmax_toasts = 2\n")?;
            jail.set_env("RAG_ASSISTANT_API_BASE", "http://from-env:9000");

            let config = Config::load_from(Some(Path::new("config.toml"))).map_err(|e| e.to_string())?;

            assert_eq!(config.api_base, "http://from-env:9000");
            assert_eq!(config.max_toasts, 2);
            Ok(())
        });
    }
}
