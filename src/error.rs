//! Error types for the LED characteristic model.
//!
//! This module provides a unified error type [`LedError`] that covers
//! catalog lookup and construction, caller input validation, and the
//! I/O performed by the CLI front-end.
//!
//! A computation with no finite answer is not an error: the model returns
//! `None` for it and callers branch on that.

use thiserror::Error;

/// Result type alias using [`LedError`].
pub type Result<T> = std::result::Result<T, LedError>;

/// Unified error type for all LED model operations.
#[derive(Error, Debug)]
pub enum LedError {
    // ============ Caller Errors ============
    /// Device id not present in the catalog
    #[error("Unknown device '{id}'")]
    UnknownDevice { id: String },

    /// Non-finite, negative, non-positive or empty numeric input
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    // ============ Catalog Errors ============
    /// Two catalog entries share an id
    #[error("Duplicate device id '{id}'")]
    DuplicateDevice { id: String },

    /// Catalog entry with non-physical ratings
    #[error("Invalid device '{id}': {message}")]
    InvalidDevice { id: String, message: String },

    /// Malformed catalog document
    #[error("Failed to parse device catalog: {message}")]
    CatalogParse { message: String },

    // ============ I/O Errors ============
    /// Error reading a catalog file
    #[error("Failed to read catalog file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl LedError {
    /// Create an unknown device error
    pub fn unknown_device(id: impl Into<String>) -> Self {
        Self::UnknownDevice { id: id.into() }
    }

    /// Create an invalid input error naming the offending field
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid device error
    pub fn invalid_device(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDevice {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Name of the offending input field, if this is an input error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = LedError::unknown_device("Purple");
        assert_eq!(e.to_string(), "Unknown device 'Purple'");

        let e = LedError::invalid_input("target_current", "must be positive");
        assert_eq!(e.field(), Some("target_current"));
        assert!(e.to_string().contains("must be positive"));
    }
}
