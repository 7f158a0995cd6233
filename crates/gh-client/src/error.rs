//! Classified GitHub API failures
//!
//! The client trait returns `anyhow::Result`, but callers need to tell a
//! missing resource (404) from a permission problem (403) or a validation
//! failure (422). Every non-2xx response is therefore wrapped in an
//! [`ApiError`] which can be recovered with [`ApiError::status_of`].

use thiserror::Error;

/// A non-successful response from the GitHub API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("GitHub API error: {status} - {message}")]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Message from the response body
    pub message: String,
}

impl ApiError {
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const UNPROCESSABLE: u16 = 422;

    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of `err` if it is (or wraps) an `ApiError`
    pub fn status_of(err: &anyhow::Error) -> Option<u16> {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .map(|api| api.status)
    }

    /// Whether `err` is an `ApiError` with one of the given statuses
    pub fn is_status(err: &anyhow::Error, statuses: &[u16]) -> bool {
        Self::status_of(err).is_some_and(|status| statuses.contains(&status))
    }
}

/// Convert an octocrab error, classifying GitHub responses by status
pub(crate) fn from_octocrab(err: octocrab::Error) -> anyhow::Error {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            ApiError::new(source.status_code.as_u16(), source.message).into()
        }
        other => other.into(),
    }
}
