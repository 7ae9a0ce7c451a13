// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KigoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No default config found for tag `{0}`")]
    UnknownTag(String),

    #[error("Invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to hash {path}: {reason}")]
    Hash { path: String, reason: String },

    #[error("Failed to walk {path}: {reason}")]
    Walk { path: String, reason: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, KigoError>;
