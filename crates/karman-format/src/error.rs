//! Error types for karman-format.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported scenario file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Invalid scenario: {0}")]
    Invalid(#[from] karman_lbm::LbmError),
}

pub type Result<T> = std::result::Result<T, FormatError>;
