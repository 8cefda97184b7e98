// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for circuit construction, backend execution and correction.

use std::fmt;

use crate::syndrome::Syndrome;

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Config(String),
    /// Backend error
    Backend(BackendError),
    /// Validation error
    Validation(ValidationError),
    /// Syndrome handling error
    Syndrome(SyndromeError),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Backend(e) => write!(f, "Backend error: {}", e),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Syndrome(e) => write!(f, "Syndrome error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Backend(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::Syndrome(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        Error::Backend(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<SyndromeError> for Error {
    fn from(e: SyndromeError) -> Self {
        Error::Syndrome(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Failures reported by a [`QuantumBackend`](crate::backend::QuantumBackend).
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend not found
    NotFound(String),
    /// Backend unavailable
    Unavailable(String),
    /// Execution failed
    ExecutionFailed(String),
    /// Authentication failed
    AuthenticationFailed(String),
    /// Timeout
    Timeout(String),
    /// Invalid request
    InvalidRequest(String),
    /// HTTP error (for remote backends)
    Http(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotFound(name) => write!(f, "Backend not found: {}", name),
            BackendError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            BackendError::ExecutionFailed(msg) => write!(f, "Execution failed: {}", msg),
            BackendError::AuthenticationFailed(msg) => write!(f, "Authentication failed: {}", msg),
            BackendError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            BackendError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            BackendError::Http(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A single value is out of bounds
    Field { field: String, message: String },
    /// Gate references a qubit outside the quantum register
    QubitOutOfRange { qubit: u32, num_qubits: u32 },
    /// Gate references a bit outside the classical register
    ClbitOutOfRange { clbit: u32, num_clbits: u32 },
    /// Register has the wrong width for the operation
    RegisterSizeMismatch {
        register: String,
        expected: u32,
        actual: u32,
    },
    /// Request is larger than the backend allows
    ResourceLimit {
        resource: String,
        limit: u64,
        requested: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::QubitOutOfRange { qubit, num_qubits } => {
                write!(
                    f,
                    "Qubit {} out of range for {}-qubit register",
                    qubit, num_qubits
                )
            }
            ValidationError::ClbitOutOfRange { clbit, num_clbits } => {
                write!(
                    f,
                    "Classical bit {} out of range for {}-bit register",
                    clbit, num_clbits
                )
            }
            ValidationError::RegisterSizeMismatch {
                register,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Register size mismatch for {}: expected {}, got {}",
                    register, expected, actual
                )
            }
            ValidationError::ResourceLimit {
                resource,
                limit,
                requested,
            } => {
                write!(
                    f,
                    "Resource limit exceeded for {}: limit={}, requested={}",
                    resource, limit, requested
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while reading or acting on a syndrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyndromeError {
    /// Outcome string is not a 7-bit binary string
    Malformed(String),
    /// No correction is defined for this syndrome
    Unmapped(Syndrome),
    /// Backend returned no measurement outcomes
    EmptyResultSet,
}

impl fmt::Display for SyndromeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyndromeError::Malformed(raw) => write!(f, "Malformed syndrome: {:?}", raw),
            SyndromeError::Unmapped(s) => write!(f, "No correction defined for syndrome {}", s),
            SyndromeError::EmptyResultSet => write!(f, "Backend returned no measurement outcomes"),
        }
    }
}

impl std::error::Error for SyndromeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    // =========================================================================
    // Error Display tests
    // =========================================================================

    #[test]
    fn test_error_display_config() {
        let e = Error::Config("no backends".into());
        assert_eq!(e.to_string(), "Configuration error: no backends");
    }

    #[test]
    fn test_error_display_backend() {
        let e = Error::Backend(BackendError::NotFound("fixed".into()));
        assert_eq!(e.to_string(), "Backend error: Backend not found: fixed");
    }

    #[test]
    fn test_error_display_syndrome() {
        let e = Error::Syndrome(SyndromeError::EmptyResultSet);
        assert_eq!(
            e.to_string(),
            "Syndrome error: Backend returned no measurement outcomes"
        );
    }

    #[test]
    fn test_error_display_io() {
        let e = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(e.to_string(), "IO error: gone");
    }

    // =========================================================================
    // ValidationError Display tests
    // =========================================================================

    #[test]
    fn test_validation_error_display_register_mismatch() {
        let e = ValidationError::RegisterSizeMismatch {
            register: "qubits".into(),
            expected: 7,
            actual: 5,
        };
        assert_eq!(
            e.to_string(),
            "Register size mismatch for qubits: expected 7, got 5"
        );
    }

    #[test]
    fn test_validation_error_display_qubit_out_of_range() {
        let e = ValidationError::QubitOutOfRange {
            qubit: 9,
            num_qubits: 7,
        };
        assert_eq!(e.to_string(), "Qubit 9 out of range for 7-qubit register");
    }

    #[test]
    fn test_validation_error_display_resource_limit() {
        let e = ValidationError::ResourceLimit {
            resource: "shots".into(),
            limit: 1000,
            requested: 2000,
        };
        assert_eq!(
            e.to_string(),
            "Resource limit exceeded for shots: limit=1000, requested=2000"
        );
    }

    // =========================================================================
    // SyndromeError Display tests
    // =========================================================================

    #[test]
    fn test_syndrome_error_display_unmapped() {
        let s: Syndrome = "1111111".parse().unwrap();
        let e = SyndromeError::Unmapped(s);
        assert_eq!(e.to_string(), "No correction defined for syndrome 1111111");
    }

    #[test]
    fn test_syndrome_error_display_malformed() {
        let e = SyndromeError::Malformed("01x".into());
        assert_eq!(e.to_string(), "Malformed syndrome: \"01x\"");
    }

    // =========================================================================
    // Error::source() and From impls
    // =========================================================================

    #[test]
    fn test_error_source() {
        assert!(Error::Io(std::io::Error::other("disk")).source().is_some());
        assert!(Error::Syndrome(SyndromeError::EmptyResultSet)
            .source()
            .is_some());
        assert!(Error::Config("x".into()).source().is_none());
        assert!(Error::Serialization("x".into()).source().is_none());
    }

    #[test]
    fn test_from_backend_error() {
        let e: Error = BackendError::Timeout("slow".into()).into();
        assert!(matches!(e, Error::Backend(BackendError::Timeout(_))));
    }

    #[test]
    fn test_from_syndrome_error() {
        let e: Error = SyndromeError::EmptyResultSet.into();
        assert!(matches!(e, Error::Syndrome(SyndromeError::EmptyResultSet)));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{{{{").unwrap_err();
        let e: Error = yaml_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }
}
