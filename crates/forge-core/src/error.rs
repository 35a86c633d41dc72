//! Error types for Asset Forge

use thiserror::Error;

/// The main error type for forge operations
#[derive(Debug, Error)]
pub enum ForgeError {
    /// A required free-text field is missing or blank
    #[error("{0}")]
    ValidationError(String),

    /// The generation backend failed or returned an unusable payload
    #[error("{0}")]
    GenerationError(String),

    /// Capturing or writing an exported visual failed
    #[error("Could not export the asset: {0}")]
    ExportError(String),

    #[error("A generation request is already in flight")]
    GenerateInFlight,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;
