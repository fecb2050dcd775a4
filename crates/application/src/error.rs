//! Application error types

use keyprobe_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
///
/// Assertion failures and capture failures are reported outcomes, not errors.
/// These variants cover what stops a run from being set up at all.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A test case definition is invalid.
    #[error("invalid test case '{case}': {source}")]
    InvalidTestCase {
        /// Name of the case.
        case: String,
        /// The validation failure.
        #[source]
        source: DomainError,
    },

    /// The response source had nothing for a case.
    #[error("no response for test case '{0}'")]
    MissingResponse(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
