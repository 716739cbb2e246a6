//! Typed storefront API surface.
//!
//! [`ApiClient`] is a thin facade over [`AuthTransport`]: each method is a
//! single request/response round trip with no retries beyond the
//! transport's refresh cycle. Methods are grouped per resource:
//!
//! - [`auth`] - login/logout and session population
//! - [`products`] - catalog listing and admin product management
//! - [`transactions`] - checkout, purchase history
//! - [`payments`] - payment submission and pending-payment details
//!
//! Every response body is wrapped in a `{ "data": ... }` envelope by the
//! server; `execute` unwraps it and maps non-2xx statuses onto
//! [`ApiError`].

pub mod auth;
pub mod payments;
pub mod products;
pub mod transactions;

pub use products::{ImageUpload, NewProduct};

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, AuthTransport, HttpTransport, Transport, TransportError};

/// Client for the remote storefront API.
///
/// Cheaply cloneable; shares one transport and one session store across
/// clones. Generic over the transport so the whole API surface can be
/// exercised against scripted transports in tests.
pub struct ApiClient<T = HttpTransport> {
    inner: Arc<ApiClientInner<T>>,
}

struct ApiClientInner<T> {
    transport: AuthTransport<T>,
    session: SessionStore,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ApiClient {
    /// Create a client over HTTP from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
    ) -> std::result::Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new(config)?, session))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client over an arbitrary transport.
    #[must_use]
    pub fn with_transport(transport: T, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                transport: AuthTransport::new(transport, session.clone()),
                session,
            }),
        }
    }

    /// The session store this client reads credentials from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Dispatch `request` and unwrap the `data` envelope.
    pub(crate) async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        #[derive(Deserialize)]
        struct Envelope<R> {
            data: R,
        }

        let response = self.inner.transport.send(request).await?;
        check_status(&response)?;
        let envelope: Envelope<R> = response.json()?;
        Ok(envelope.data)
    }

    /// Dispatch `request`, discarding any response body.
    pub(crate) async fn execute_unit(&self, request: ApiRequest) -> Result<()> {
        let response = self.inner.transport.send(request).await?;
        check_status(&response)
    }
}

/// Map non-2xx statuses onto `ApiError`.
///
/// A 401 reaching this point means the transport's refresh cycle is
/// already exhausted and the session has been cleared.
fn check_status(response: &ApiResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound(error_message(response))),
        status => Err(ApiError::Api {
            status,
            message: error_message(response),
        }),
    }
}

/// Pull a human-readable message out of an error response body.
fn error_message(response: &ApiResponse) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    response.json::<ErrorBody>().map_or_else(
        |_| {
            let text: String = response.text().chars().take(200).collect();
            if text.is_empty() {
                "(no error details provided)".to_string()
            } else {
                text
            }
        },
        |body| body.message,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(status: u16, body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    #[test]
    fn test_check_status_maps_statuses() {
        assert!(check_status(&response(200, serde_json::json!({}))).is_ok());
        assert!(matches!(
            check_status(&response(401, serde_json::json!({}))),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            check_status(&response(404, serde_json::json!({"message": "gone"}))),
            Err(ApiError::NotFound(message)) if message == "gone"
        ));
        assert!(matches!(
            check_status(&response(422, serde_json::json!({"message": "stock exceeded"}))),
            Err(ApiError::Api { status: 422, message }) if message == "stock exceeded"
        ));
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        let raw = ApiResponse {
            status: 500,
            body: b"boom".to_vec(),
        };
        assert_eq!(error_message(&raw), "boom");

        let empty = ApiResponse {
            status: 500,
            body: Vec::new(),
        };
        assert_eq!(error_message(&empty), "(no error details provided)");
    }
}
