//! Error types for the status registry

use thiserror::Error;

use crate::severity::Severity;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Status registry errors
///
/// The reporter itself never fails; these cover configuration, parsing and
/// strict insertion.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown severity class: {0}")]
    UnknownSeverity(String),

    #[error("Invalid status code: {0}")]
    InvalidCode(String),

    #[error("Status code {code} is already registered as {existing}, cannot add it to {requested}")]
    CodeConflict {
        code: i64,
        existing: Severity,
        requested: Severity,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
