//! Unified error handling for the client library.
//!
//! Every API call returns `Result<T, ApiError>`. Errors are recovered at the
//! boundary where they occur; nothing here is fatal to the process. The one
//! session-fatal condition - an exhausted refresh credential - is handled
//! inside the transport by clearing the session, and surfaces to callers as
//! [`ApiError::Unauthorized`].

use thiserror::Error;

use crate::transport::TransportError;

/// Application-level error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server rejected the credentials and the refresh cycle is
    /// exhausted. The session has already been cleared.
    #[error("session expired, please log in again")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the request for any other reason.
    #[error("request failed ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the raw body when unparseable.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Checkout was attempted with no items selected. No request is made.
    #[error("no items selected for checkout")]
    EmptySelection,
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("transaction 9".to_string());
        assert_eq!(err.to_string(), "not found: transaction 9");

        let err = ApiError::Api {
            status: 422,
            message: "stock exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "request failed (422): stock exceeded");
    }

    #[test]
    fn test_unauthorized_reads_as_a_login_prompt() {
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "session expired, please log in again"
        );
    }
}
