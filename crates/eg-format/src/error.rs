//! Error types for EG file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, decoding, encoding or writing EG files.
#[derive(Debug, Error)]
pub enum EgError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input is not valid UTF-8 text.
    #[error("EG input is not valid UTF-8")]
    InvalidEncoding,

    /// A mandatory header key is absent after parsing and overrides.
    #[error("missing required header field: {key}")]
    MissingRequiredField { key: &'static str },

    /// Encode could not resolve the diagnostic name or shot number.
    #[error("cannot resolve {field}: provide it explicitly or set it on the dataset")]
    MissingIdentifier { field: &'static str },

    /// Row/column counts are incompatible with the declared dimensions.
    #[error("shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// A header line does not have the `key = value` shape.
    #[error("malformed header line {line}: {reason}: {text:?}")]
    MalformedLine {
        line: usize,
        text: String,
        reason: &'static str,
    },

    /// A typed header value could not be coerced.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// An override value cannot be coerced to the field it targets.
    #[error("override for {key} has an incompatible type")]
    InvalidOverride { key: String },

    /// A data table field is not a number.
    #[error("invalid number on line {line}: {field:?}")]
    InvalidNumber { line: usize, field: String },

    /// Unsupported numeric format specifier.
    #[error("unsupported number format: {spec:?}")]
    InvalidFormatSpec { spec: String },

    /// Array construction failed.
    #[error("array shape error: {0}")]
    Array(#[from] ndarray::ShapeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DataFrame construction failed.
    #[cfg(feature = "polars")]
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Result type alias for EG operations.
pub type Result<T> = std::result::Result<T, EgError>;

impl EgError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    /// Create a MalformedLine error.
    pub fn malformed_line(line: usize, text: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedLine {
            line,
            text: text.into(),
            reason,
        }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidOverride error.
    pub fn invalid_override(key: impl Into<String>) -> Self {
        Self::InvalidOverride { key: key.into() }
    }

    /// Create an InvalidNumber error.
    pub fn invalid_number(line: usize, field: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            field: field.into(),
        }
    }
}
