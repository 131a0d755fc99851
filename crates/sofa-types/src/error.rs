//! Error types for SOFA.

use std::io;

/// Errors produced by SOFA platform services and the core engine.
#[derive(Debug, thiserror::Error)]
pub enum SofaError {
    #[error("store error: {0}")]
    Store(String),

    #[error("media error: {0}")]
    Media(String),

    #[error("display error: {0}")]
    Display(String),

    #[error("sub-document error: {0}")]
    Subdocument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SofaError>;
