//! Persisted application settings stored as TOML in the `.telepredict` folder.

mod io;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::churn_api::Endpoints;

pub use io::{config_path, load_from_path, load_or_default, save, save_to_path};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "TELEPREDICT_API_URL";

const DEFAULT_BASE_URL: &str = "https://telecom-api.example/";
const DEFAULT_PREDICT_PATH: &str = "predict_churn/";
const DEFAULT_RETRAIN_PATH: &str = "retrain_model/";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Retrain responses may embed a rendered plot, so the cap is generous.
const DEFAULT_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

/// Where the churn API lives and how the transport talks to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    #[serde(default = "default_retrain_path")]
    pub retrain_path: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Unset means a request may wait on the server indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            retrain_path: default_retrain_path(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: None,
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ApiSettings {
    /// Resolve the predict and retrain URLs against the base URL.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        let base = parse_base_url(&self.base_url)?;
        let join = |path: &str| {
            base.join(path).map_err(|source| ConfigError::InvalidUrl {
                value: format!("{}{}", base, path),
                source,
            })
        };
        Ok(Endpoints {
            predict: join(&self.predict_path)?,
            retrain: join(&self.retrain_path)?,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    /// Replace the base URL, keeping a trailing slash so relative joins append.
    pub fn set_base_url(&mut self, value: &str) {
        self.base_url = with_trailing_slash(value);
    }
}

impl AppConfig {
    /// Apply environment overrides using the provided lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            tracing::info!("Using API base URL from {API_URL_ENV}: {url}");
            self.api.set_base_url(&url);
        }
    }
}

/// Parse the base URL as a directory so `join` appends rather than replaces the last segment.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let value = with_trailing_slash(value);
    let url = Url::parse(&value).map_err(|source| ConfigError::InvalidUrl {
        value: value.clone(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn with_trailing_slash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_predict_path() -> String {
    DEFAULT_PREDICT_PATH.to_string()
}

fn default_retrain_path() -> String {
    DEFAULT_RETRAIN_PATH.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// A configured URL could not be parsed.
    #[error("Invalid API URL {value}: {source}")]
    InvalidUrl {
        /// Offending value.
        value: String,
        /// URL parse error.
        source: url::ParseError,
    },
    /// The API base URL is not http or https.
    #[error("Unsupported API URL scheme: {0}")]
    UnsupportedScheme(String),
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_match_public_api() {
        let endpoints = ApiSettings::default().endpoints().unwrap();
        assert_eq!(
            endpoints.predict.as_str(),
            "https://telecom-api.example/predict_churn/"
        );
        assert_eq!(
            endpoints.retrain.as_str(),
            "https://telecom-api.example/retrain_model/"
        );
    }

    #[test]
    fn base_url_without_trailing_slash_still_appends_paths() {
        let mut settings = ApiSettings::default();
        settings.set_base_url("http://127.0.0.1:9000/api");
        let endpoints = settings.endpoints().unwrap();
        assert_eq!(
            endpoints.predict.as_str(),
            "http://127.0.0.1:9000/api/predict_churn/"
        );
    }

    #[test]
    fn base_url_from_file_without_trailing_slash_keeps_its_path() {
        let config: AppConfig =
            toml::from_str("[api]\nbase_url = \"http://localhost:8000/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        let endpoints = config.api.endpoints().unwrap();
        assert_eq!(
            endpoints.predict.as_str(),
            "http://localhost:8000/api/predict_churn/"
        );
        assert_eq!(
            endpoints.retrain.as_str(),
            "http://localhost:8000/api/retrain_model/"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut settings = ApiSettings::default();
        settings.base_url = "ftp://example.com/".to_string();
        assert!(matches!(
            settings.endpoints(),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let mut settings = ApiSettings::default();
        settings.base_url = "not a url".to_string();
        assert!(matches!(
            settings.endpoints(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == API_URL_ENV).then(|| "http://localhost:8000".to_string())
        });
        assert_eq!(config.api.base_url, "http://localhost:8000/");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("[api]\nbase_url = \"http://a/\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://a/");
        assert_eq!(config.api.predict_path, "predict_churn/");
        assert_eq!(config.api.read_timeout(), None);
        assert_eq!(config.api.connect_timeout(), Duration::from_secs(10));
    }
}
