//! Error types for the bodylog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bodylog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML log document could not be read or is missing required fields
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A date string could not be understood
    #[error("could not parse date '{0}'")]
    DateParse(String),

    /// A weight or height string has no leading number
    #[error("malformed measurement '{0}'")]
    MalformedMeasurement(String),

    /// A unit token outside the accepted set (strict mode only)
    #[error("unrecognized unit '{unit}' in '{raw}'")]
    UnrecognizedUnit { raw: String, unit: String },

    /// Not enough distinct sample dates to interpolate or fit
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
