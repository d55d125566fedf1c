//! Error types for envsettings

use thiserror::Error;

/// Result type alias for envsettings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for envsettings
///
/// Every variant except the schema ones is fatal for settings assembly:
/// a partially configured application must never start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("Missing required environment variable '{var}'")]
    MissingRequired { var: String },

    #[error("Failed to parse environment variable '{var}' as {expected}: {raw:?}")]
    ParseFailure {
        var: String,
        raw: String,
        expected: &'static str,
    },

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Invalid schema field '{key}': {reason}")]
    InvalidSchema { key: String, reason: String },

    #[error("Field '{key}' is declared {actual} but was resolved as {expected}")]
    KindMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Field '{key}' is declared {declared} but was resolved with a {parser} parser")]
    TypeMismatch {
        key: String,
        declared: &'static str,
        parser: &'static str,
    },

    #[error("Schema field '{0}' was never resolved")]
    UnresolvedField(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if a required variable was absent
    #[must_use]
    pub fn is_missing_required(&self) -> bool {
        matches!(self, Error::MissingRequired { .. })
    }

    /// Check if a present variable could not be parsed
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Error::ParseFailure { .. })
    }

    /// The fully namespaced environment variable this error is about, if any
    #[must_use]
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Error::MissingRequired { var } | Error::ParseFailure { var, .. } => Some(var),
            _ => None,
        }
    }
}
