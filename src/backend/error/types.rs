/**
 * Backend Error Types
 *
 * # Error Categories
 *
 * ## Store Errors
 *
 * Raised by the post repository:
 * - The database file cannot be opened or created
 * - A statement fails (connection loss, malformed SQL, constraint violation)
 * - A stored row cannot be decoded into a Post
 * - A store call exceeds the configured timeout
 *
 * ## Broadcast Errors
 *
 * Raised by a broadcaster when the relay cannot be reached, answers with a
 * non-success status, or does not answer in time. The publish pipeline logs
 * these and carries on; they never reach the client.
 *
 * ## Backend Errors
 *
 * What HTTP handlers return. Store faults map to a generic 500 response.
 */

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Failure of the durable store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened
    #[error("failed to open database: {0}")]
    Connect(#[source] sqlx::Error),

    /// The database directory could not be prepared
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    /// A statement failed
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A row could not be decoded into a Post
    #[error("failed to decode row: {message}")]
    Decode {
        /// What was wrong with the row
        message: String,
    },

    /// A store call did not complete in time
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Failure of the realtime relay
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// The relay could not be reached
    #[error("relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("relay rejected publish with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the relay
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The payload could not be serialized
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request could not be signed
    #[error("failed to sign request: {0}")]
    Signing(String),

    /// The publish call did not complete in time
    #[error("publish timed out after {0:?}")]
    Timeout(Duration),
}

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use liveblog::backend::error::{BackendError, StoreError};
///
/// let err: BackendError = StoreError::decode("content is NULL").into();
/// assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(err.message(), "internal server error");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Store fault while serving the request
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Handler error (e.g., malformed request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// - `Store` - 500 Internal Server Error
    /// - `HandlerError` - the status carried by the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HandlerError { status, .. } => *status,
        }
    }

    /// Get the client-facing error message
    ///
    /// Store faults are reported generically; the detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) => "internal server error".to_string(),
            Self::HandlerError { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid form");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid form");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_store_error_is_server_error() {
        let error: BackendError = StoreError::Timeout(Duration::from_millis(10)).into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_message_hides_detail() {
        let error: BackendError = StoreError::Query(sqlx::Error::RowNotFound).into();
        assert_eq!(error.message(), "internal server error");
        assert!(error.to_string().contains("query failed"));
    }

    #[test]
    fn test_broadcast_rejected_display() {
        let error = BroadcastError::Rejected {
            status: 401,
            body: "Invalid signature".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "relay rejected publish with status 401: Invalid signature"
        );
    }
}
