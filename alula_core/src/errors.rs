//! # Error Types
//!
//! Structured error types for alula_core. The calculation engine itself never
//! fails: a malformed design always yields a best-effort report. Errors only
//! come out of strict parsing helpers and design file I/O, and they carry
//! enough context for a front end to show a useful message or emit JSON.
//!
//! ## Example
//!
//! ```rust
//! use alula_core::errors::{AlulaError, AlulaResult};
//!
//! fn parse_rpm(text: &str) -> AlulaResult<f64> {
//!     text.trim()
//!         .parse()
//!         .map_err(|_| AlulaError::invalid_input("rotor_rpm", text, "Not a number"))
//! }
//!
//! assert!(parse_rpm("350").is_ok());
//! assert_eq!(parse_rpm("fast").unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for alula_core operations
pub type AlulaResult<T> = Result<T, AlulaError>;

/// Structured error type for parsing and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AlulaError {
    /// An input value is invalid (not a number, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A named option (vehicle type, tail style, ...) is not recognised
    #[error("Unknown {kind}: '{value}'")]
    UnknownOption { kind: String, value: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Design file schema version is not supported
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AlulaError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        AlulaError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownOption error
    pub fn unknown_option(kind: impl Into<String>, value: impl Into<String>) -> Self {
        AlulaError::UnknownOption {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        AlulaError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        AlulaError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether the caller can carry on with its current in-memory design.
    ///
    /// Every file and parse failure is recoverable; only internal errors are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AlulaError::Internal { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AlulaError::InvalidInput { .. } => "INVALID_INPUT",
            AlulaError::UnknownOption { .. } => "UNKNOWN_OPTION",
            AlulaError::FileError { .. } => "FILE_ERROR",
            AlulaError::SerializationError { .. } => "SERIALIZATION_ERROR",
            AlulaError::VersionMismatch { .. } => "VERSION_MISMATCH",
            AlulaError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = AlulaError::invalid_input("wing_area", "abc", "Not a number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: AlulaError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AlulaError::unknown_option("tail style", "H-Tail").error_code(), "UNKNOWN_OPTION");
        assert_eq!(AlulaError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_file_errors_are_recoverable() {
        assert!(AlulaError::file_error("open", "x.json", "missing").is_recoverable());
        assert!(!AlulaError::Internal { message: "boom".into() }.is_recoverable());
    }

    #[test]
    fn test_display_message() {
        let error = AlulaError::unknown_option("vehicle type", "Hovercraft");
        assert_eq!(error.to_string(), "Unknown vehicle type: 'Hovercraft'");
    }
}
