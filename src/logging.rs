//! Logging configuration with optional file rotation
//!
//! Output goes to stderr and, when a file path is configured, to a daily
//! rotated file. Either sink can emit JSON instead of the compact format.

use crate::config::LoggingConfig;
use crate::error::{JeedomError, Result};
use std::path::PathBuf;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `jeedom_mcp_rust=debug`
    pub level: String,

    /// Log to file
    pub file_path: Option<PathBuf>,

    /// Log to stderr
    pub stderr: bool,

    /// Emit JSON records
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            stderr: true,
            json: false,
        }
    }
}

impl LogConfig {
    /// Force debug level
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.level = "debug".to_string();
        }
        self
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            file_path: config.file.as_ref().map(PathBuf::from),
            json: config.json_format,
            ..Self::default()
        }
    }
}

fn format_layer<W>(writer: W, ansi: bool, json: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_target(true)
            .with_writer(writer)
            .boxed()
    }
}

/// Initialize logging with the given configuration
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| JeedomError::config(format!("Invalid log filter '{}': {e}", config.level)))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.stderr {
        layers.push(format_layer(std::io::stderr, true, config.json));
    }

    if let Some(file_path) = &config.file_path {
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file_appender = tracing_appender::rolling::daily(
            file_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new(".")),
            file_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("jeedom-mcp.log")),
        );
        layers.push(format_layer(file_appender, false, config.json));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| JeedomError::internal(format!("Failed to initialize logging: {e}")))
}
