//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating test definitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A JSON path expression is malformed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending expression.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An environment key is empty or contains template delimiters.
    #[error("invalid environment key: {0:?}")]
    InvalidEnvironmentKey(String),

    /// A test case has no name.
    #[error("test case name must not be empty")]
    EmptyTestCaseName,

    /// Two capture rules in one test case write the same key.
    #[error("duplicate capture target '{0}'")]
    DuplicateCaptureTarget(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
