//! Error taxonomy shared by the fetcher and the repository.

use thiserror::Error;

/// Failure of a single page fetch (transport error, timeout, or non-2xx status).
///
/// Callers treat every variant the same way; the split only exists for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection refused, TLS, ...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// Final response (after redirects) had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(String),
}

/// Kind of an expected, recovered failure reported in an [`crate::repository::Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// Raw input did not normalize to a valid URL. No storage touched.
    #[error("validation")]
    Validation,
    /// Unknown URL id.
    #[error("not found")]
    NotFound,
    /// Network failure, timeout, or non-success HTTP status during a check.
    #[error("fetch")]
    Fetch,
    /// Constraint violation or connection failure; transaction rolled back.
    #[error("storage")]
    Storage,
}

impl FailureKind {
    /// HTTP status a web front end should answer with for this failure.
    pub fn http_status(self) -> u16 {
        match self {
            FailureKind::Validation => 422,
            FailureKind::NotFound => 404,
            FailureKind::Fetch | FailureKind::Storage => 500,
        }
    }
}
