//! Custom error types for balances-report
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for balance container and report operations
#[derive(Error, Debug)]
pub enum BalancesError {
    /// A decimal operation received a missing or unusable operand
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Wrong container variant (or an otherwise unusable argument) was passed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Name-based lookup failed
    #[error("{entity_type} not found: {identifier}{}", scope_suffix(.scope))]
    NotFound {
        entity_type: &'static str,
        identifier: String,
        scope: Option<String>,
    },

    /// Decimal arithmetic left the representable range
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Malformed numeric or date text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn scope_suffix(scope: &Option<String>) -> String {
    match scope {
        Some(scope) => format!(" in {}", scope),
        None => String::new(),
    }
}

impl BalancesError {
    /// Create a "not found" error for a container looked up inside a group
    pub fn container_not_found(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Balances container",
            identifier: name.into(),
            scope: Some(format!("group {}", group.into())),
        }
    }

    /// Create a "not found" error for a container looked up without a scope
    pub fn unscoped_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Balances container",
            identifier: name.into(),
            scope: None,
        }
    }

    /// Create the error raised when a group is passed where an account is required
    pub fn container_must_be_from_account(name: impl Into<String>) -> Self {
        Self::InvalidArgument(format!(
            "container must be from account: {}",
            name.into()
        ))
    }

    /// Create the error raised when an account is asked to aggregate another container
    pub fn container_must_be_from_group(name: impl Into<String>) -> Self {
        Self::InvalidArgument(format!("container must be from group: {}", name.into()))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is an invalid operand error
    pub fn is_invalid_operand(&self) -> bool {
        matches!(self, Self::InvalidOperand(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BalancesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BalancesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for BalancesError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for BalancesError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<rust_decimal::Error> for BalancesError {
    fn from(err: rust_decimal::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for balances-report operations
pub type BalancesResult<T> = Result<T, BalancesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BalancesError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_names_query_and_group() {
        let err = BalancesError::container_not_found("Nonexistent", "Expenses");
        assert_eq!(
            err.to_string(),
            "Balances container not found: Nonexistent in group Expenses"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unscoped_not_found() {
        let err = BalancesError::unscoped_not_found("Cash");
        assert_eq!(err.to_string(), "Balances container not found: Cash");
    }

    #[test]
    fn test_invalid_argument() {
        let err = BalancesError::container_must_be_from_group("Cash");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Invalid argument: container must be from group: Cash"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BalancesError = io_err.into();
        assert!(matches!(err, BalancesError::Io(_)));
    }
}
