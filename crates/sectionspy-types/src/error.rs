//! Error types for sectionspy.

use std::io;

/// Errors produced by sectionspy.
#[derive(Debug, thiserror::Error)]
pub enum SpyError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid threshold {0}: must be within [0, 1]")]
    InvalidThreshold(f64),

    #[error("invalid viewport margin: {0}")]
    InvalidMargin(String),

    #[error("page error: {0}")]
    Page(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SpyError>;
