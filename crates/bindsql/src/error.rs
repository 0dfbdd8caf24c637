//! Error types for bindsql

use thiserror::Error;

/// Result type alias for bindsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building or recording statements
#[derive(Debug, Error)]
pub enum SqlError {
    /// Placeholder count in the SQL text does not match the parameter count
    #[error("Parameter mismatch: SQL has {expected} placeholder(s) but {actual} parameter(s) were given")]
    ParameterMismatch { expected: usize, actual: usize },

    /// Alias name or value failed identifier validation
    #[error("Invalid alias: {0}")]
    InvalidAlias(String),

    /// Condition column or conjunction failed validation
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// Writing a recording failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqlError {
    /// Create a parameter mismatch error
    pub fn mismatch(expected: usize, actual: usize) -> Self {
        Self::ParameterMismatch { expected, actual }
    }

    /// Create an invalid alias error
    pub fn invalid_alias(message: impl Into<String>) -> Self {
        Self::InvalidAlias(message.into())
    }

    /// Create an invalid condition error
    pub fn invalid_condition(message: impl Into<String>) -> Self {
        Self::InvalidCondition(message.into())
    }

    /// Check if this is a parameter mismatch error
    pub fn is_parameter_mismatch(&self) -> bool {
        matches!(self, Self::ParameterMismatch { .. })
    }

    /// Check if this is an invalid alias error
    pub fn is_invalid_alias(&self) -> bool {
        matches!(self, Self::InvalidAlias(_))
    }

    /// Check if this is an invalid condition error
    pub fn is_invalid_condition(&self) -> bool {
        matches!(self, Self::InvalidCondition(_))
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
