//! Unified error handling for gcpctl-core
//!
//! Every failure surfaced by a remote API is normalised into a
//! [`RemoteServiceError`] at the client boundary, so callers never see raw
//! transport errors.
//!
//! # Example
//!
//! ```rust
//! use gcpctl_core::{CoreError, RemoteServiceError};
//!
//! let err: CoreError = RemoteServiceError::http(404, Some("NOT_FOUND"), "Spoke not found").into();
//! assert!(err.is_not_found());
//! assert_eq!(err.status(), Some(404));
//! assert_eq!(
//!     err.to_string(),
//!     "ResponseError: code=404, message=Spoke not found"
//! );
//! ```

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// A failure reported by (or while talking to) a remote API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteServiceError {
    /// HTTP status, `None` when the request never produced a response
    pub status: Option<u16>,
    /// Canonical reason such as `NOT_FOUND` or `PERMISSION_DENIED`
    pub reason: Option<String>,
    pub message: String,
}

impl RemoteServiceError {
    pub fn http(status: u16, reason: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            reason: reason.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            reason: None,
            message: message.into(),
        }
    }

    /// Build from a `google.rpc.Status` code, mapping it to the equivalent HTTP status
    pub fn from_rpc_code(code: i32, message: impl Into<String>) -> Self {
        let (status, reason) = rpc_code_to_http(code);
        Self {
            status: Some(status),
            reason: Some(reason.to_string()),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// 401 or 403
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    /// Transport failures, 429 and 5xx
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.status {
            None => true,
            Some(429) => true,
            Some(code) => (500..600).contains(&code),
        }
    }
}

impl fmt::Display for RemoteServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "ResponseError: code={}, message={}", code, self.message),
            None => write!(f, "ResponseError: message={}", self.message),
        }
    }
}

impl std::error::Error for RemoteServiceError {}

/// Canonical gRPC code to HTTP status mapping used by Google APIs
fn rpc_code_to_http(code: i32) -> (u16, &'static str) {
    match code {
        0 => (200, "OK"),
        1 => (499, "CANCELLED"),
        3 => (400, "INVALID_ARGUMENT"),
        4 => (504, "DEADLINE_EXCEEDED"),
        5 => (404, "NOT_FOUND"),
        6 => (409, "ALREADY_EXISTS"),
        7 => (403, "PERMISSION_DENIED"),
        8 => (429, "RESOURCE_EXHAUSTED"),
        9 => (400, "FAILED_PRECONDITION"),
        10 => (409, "ABORTED"),
        11 => (400, "OUT_OF_RANGE"),
        12 => (501, "UNIMPLEMENTED"),
        13 => (500, "INTERNAL"),
        14 => (503, "UNAVAILABLE"),
        15 => (500, "DATA_LOSS"),
        16 => (401, "UNAUTHENTICATED"),
        _ => (500, "UNKNOWN"),
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or unresolvable reference or scope
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure surfaced by the remote API
    #[error("{0}")]
    RemoteService(RemoteServiceError),

    /// The operation reached `done` carrying an error status
    #[error("{error}")]
    PollingFailure {
        operation: String,
        error: RemoteServiceError,
    },

    /// Waiting for the operation exceeded the configured timeout
    #[error("Operation [{operation}] did not complete within {timeout:?}")]
    OperationTimeout {
        operation: String,
        timeout: Duration,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<RemoteServiceError> for CoreError {
    fn from(err: RemoteServiceError) -> Self {
        CoreError::RemoteService(err)
    }
}

impl CoreError {
    /// The remote error carried by this error, if any
    pub fn remote(&self) -> Option<&RemoteServiceError> {
        match self {
            CoreError::RemoteService(e) | CoreError::PollingFailure { error: e, .. } => Some(e),
            _ => None,
        }
    }

    /// Original HTTP status of the remote failure
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.remote().and_then(|e| e.status)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.remote().is_some_and(RemoteServiceError::is_not_found)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.remote()
            .is_some_and(RemoteServiceError::is_unauthorized)
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CoreError::InvalidArgument(_))
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::OperationTimeout { .. })
    }
}
