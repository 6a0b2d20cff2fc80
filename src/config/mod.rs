//! Configuration management for the Jeedom bridge
//!
//! Defaults, then an optional TOML file, then `JEEDOM_*` environment
//! variables. Only the base URL and the API key are required.

pub mod credentials;

use crate::error::{JeedomError, Result};
use credentials::ApiKey;
use humantime_serde::re::humantime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, time::Duration};
use url::Url;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Remote Jeedom server
    pub jeedom: JeedomConfig,

    /// Refresh cycle settings
    pub sync: SyncConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Jeedom server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JeedomConfig {
    /// Base URL of the Jeedom installation (e.g., "http://192.168.1.20")
    pub url: Url,

    /// API key sent as `apikey` in every JSON-RPC call
    pub api_key: ApiKey,

    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Enable SSL/TLS verification
    pub verify_ssl: bool,
}

/// Refresh cycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Delay between the end of one cycle and the start of the next
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level directive
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Log file path
    pub file: Option<String>,
}

impl Default for JeedomConfig {
    fn default() -> Self {
        Self {
            url: Url::parse("http://localhost").expect("static URL is valid"),
            api_key: ApiKey::default(),
            timeout: Duration::from_secs(10),
            verify_ssl: true,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(5),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => config::Config::builder()
                .add_source(config::File::from(path))
                .build()?
                .try_deserialize::<ServerConfig>()?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = env::var("JEEDOM_URL") {
            let url_str = if url.starts_with("http://") || url.starts_with("https://") {
                url
            } else {
                format!("http://{url}")
            };
            self.jeedom.url = url_str
                .parse()
                .map_err(|e| JeedomError::config(format!("Invalid JEEDOM_URL: {e}")))?;
        }

        if let Ok(api_key) = env::var("JEEDOM_API_KEY") {
            self.jeedom.api_key = ApiKey::new(api_key);
        }

        if let Ok(timeout) = env::var("JEEDOM_TIMEOUT") {
            self.jeedom.timeout = humantime::parse_duration(&timeout)
                .map_err(|e| JeedomError::config(format!("Invalid JEEDOM_TIMEOUT: {e}")))?;
        }

        if let Ok(verify) = env::var("JEEDOM_VERIFY_SSL") {
            self.jeedom.verify_ssl = verify.to_lowercase() != "false";
        }

        if let Ok(interval) = env::var("JEEDOM_REFRESH_INTERVAL") {
            self.sync.refresh_interval = humantime::parse_duration(&interval).map_err(|e| {
                JeedomError::config(format!("Invalid JEEDOM_REFRESH_INTERVAL: {e}"))
            })?;
        }

        if let Ok(level) = env::var("RUST_LOG") {
            self.logging.level = level;
        }

        if let Ok(file) = env::var("JEEDOM_LOG_FILE") {
            self.logging.file = Some(file);
        }

        if let Ok(json) = env::var("JEEDOM_LOG_JSON") {
            self.logging.json_format = json.to_lowercase() == "true";
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.jeedom.url.scheme() != "http" && self.jeedom.url.scheme() != "https" {
            return Err(JeedomError::config("URL must use http or https scheme"));
        }

        if self.jeedom.api_key.is_empty() {
            return Err(JeedomError::config(
                "API key cannot be empty. Set JEEDOM_API_KEY or jeedom.api_key",
            ));
        }

        if self.jeedom.timeout.is_zero() {
            return Err(JeedomError::config("Timeout must be greater than zero"));
        }

        if self.sync.refresh_interval.is_zero() {
            return Err(JeedomError::config("Refresh interval must be greater than zero"));
        }

        Ok(())
    }
}
