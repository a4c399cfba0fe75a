//! # Transport Errors
//!
//! Failures of the exchange with the carrier's web services, as opposed to
//! failures the carrier reports inside a reply.
//!
//! # Examples
//!
//! ```
//! use carrier_client::infrastructure::carrier::error::TransportError;
//!
//! let error = TransportError::timeout("request timed out after 30000ms");
//! assert!(error.is_retryable());
//!
//! let error = TransportError::decode("missing field `HighestSeverity`");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for carrier transport operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("carrier returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Request could not be encoded or response was not a document.
    #[error("carrier protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Response document did not match the expected reply shape.
    #[error("carrier decode error: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// Client-side failure, e.g. the HTTP client could not be built.
    #[error("carrier transport internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl TransportError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns the HTTP status, if the carrier answered with one.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for carrier transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
