//! Error types for the Jeedom assistant bridge
//!
//! Lower layers return [`JeedomError`]; the sync cycle absorbs them into
//! defaults and only the action dispatcher reports failure outward.

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, JeedomError>;

/// Error types for Jeedom bridge operations
#[derive(Error, Debug)]
pub enum JeedomError {
    /// Connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Authentication errors (rejected API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error object returned by the JSON-RPC endpoint
    #[error("Remote call {method} failed ({code}): {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl JeedomError {
    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(msg: S) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a JSON-RPC error
    pub fn rpc<M: Into<String>, S: Into<String>>(method: M, code: i64, message: S) -> Self {
        Self::Rpc {
            method: method.into(),
            code,
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parsing error
    pub fn parsing_error<S: Into<String>>(msg: S) -> Self {
        Self::Parsing(msg.into())
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Generic(anyhow::anyhow!(msg.into()))
    }
}

impl From<config::ConfigError> for JeedomError {
    fn from(err: config::ConfigError) -> Self {
        JeedomError::Config(err.to_string())
    }
}

impl From<url::ParseError> for JeedomError {
    fn from(err: url::ParseError) -> Self {
        JeedomError::Config(format!("Invalid URL: {err}"))
    }
}
