//! Transport layer: abstract request dispatch plus the authenticated
//! decorator.
//!
//! The [`Transport`] trait keeps the retry state machine independent of any
//! specific HTTP library: [`HttpTransport`] is the `reqwest`-backed
//! implementation, and tests drive [`AuthTransport`] with scripted
//! in-memory transports instead of a network.
//!
//! # Response lifecycle
//!
//! Per request: `SENT -> (OK | UNAUTHORIZED)`; on the first 401 the request
//! is flagged as a retry and the transport exchanges the refresh credential
//! for a new bearer token (`UNAUTHORIZED -> REFRESHING`), patches the
//! request, and resubmits it exactly once (`RETRIED_OK`). Any failure along
//! the refresh path (`REFRESH_FAILED`) clears the whole session and the
//! original 401 propagates to the caller. A retried request that is
//! rejected again is never retried a second time.

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::session::SessionStore;

/// The credential-refresh endpoint. Called through the inner transport so
/// the refresh request itself is never intercepted.
const REFRESH_PATH: &str = "/auth/refresh-token";

const UNAUTHORIZED: u16 = 401;

// =============================================================================
// Request / response model
// =============================================================================

/// HTTP method subset used by the storefront API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        write!(f, "{name}")
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    /// Field value.
    pub value: FormValue,
}

/// Value of a multipart form field.
#[derive(Debug, Clone)]
pub enum FormValue {
    /// Plain text field.
    Text(String),
    /// File upload field.
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Request body variants the API uses.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// A transport-level request.
///
/// Paths are relative to the configured API base URL. `bearer` is filled
/// in by [`AuthTransport`]; `retried` marks a request that has already been
/// through one refresh cycle and guarantees at most one retry per original
/// call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub bearer: Option<SecretString>,
    pub retried: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            bearer: None,
            retried: false,
        }
    }

    /// A bodyless GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, RequestBody::Empty)
    }

    /// A bodyless DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, RequestBody::Empty)
    }

    /// A JSON-bodied request.
    #[must_use]
    pub fn json(method: Method, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(method, path, RequestBody::Json(body))
    }

    /// A multipart-form request (product image uploads).
    #[must_use]
    pub fn multipart(method: Method, path: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self::new(method, path, RequestBody::Multipart(parts))
    }
}

/// A transport-level response: status plus raw body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as (lossy) text, for error messages.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Errors raised below the API layer: the request never produced a usable
/// response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connect, timeout, invalid multipart, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-specific failure outside HTTP (used by test transports).
    #[error("transport failure: {0}")]
    Other(String),
}

// =============================================================================
// Transport trait
// =============================================================================

/// Dispatches a single request and returns the raw response.
///
/// Non-2xx statuses are data, not errors, at this layer; the server decides
/// what an unauthenticated call means.
pub trait Transport: Send + Sync {
    /// Dispatch `request`.
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

// =============================================================================
// HttpTransport
// =============================================================================

/// `reqwest`-backed transport joining request paths onto the API base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    fn build_multipart(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part.value {
                FormValue::Text(value) => form.text(part.name, value),
                FormValue::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let file = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)?;
                    form.part(part.name, file)
                }
            };
        }
        Ok(form)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_multipart(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}

// =============================================================================
// AuthTransport
// =============================================================================

/// Decorator attaching credentials to outbound calls and recovering from
/// their expiry.
///
/// Reads the bearer token from the session store before dispatch; on a 401
/// for a request not already marked as a retry, exchanges the refresh
/// credential for a new token, patches the request, and resubmits it once.
/// Concurrent requests each refresh independently - there is no
/// de-duplication, but every original request gets at most one retry.
#[derive(Clone)]
pub struct AuthTransport<T> {
    inner: T,
    session: SessionStore,
}

impl<T: Transport> AuthTransport<T> {
    /// Wrap `inner`, reading and writing credentials through `session`.
    pub const fn new(inner: T, session: SessionStore) -> Self {
        Self { inner, session }
    }

    /// Exchange the refresh credential for a new bearer token.
    ///
    /// Returns the new token after writing it into the session store, or
    /// `None` when the refresh path failed in any way (missing credential,
    /// transport error, non-2xx response, malformed body).
    async fn refresh_access_token(&self) -> Option<SecretString> {
        #[derive(Deserialize)]
        struct RefreshEnvelope {
            data: RefreshData,
        }

        #[derive(Deserialize)]
        struct RefreshData {
            token: String,
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            warn!("no refresh credential available");
            return None;
        };

        let request = ApiRequest::json(
            Method::Post,
            REFRESH_PATH,
            serde_json::json!({ "refresh_token": refresh_token.expose_secret() }),
        );

        let response = match self.inner.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token refresh request failed");
                return None;
            }
        };
        if !response.is_success() {
            warn!(status = response.status, "token refresh rejected");
            return None;
        }

        match response.json::<RefreshEnvelope>() {
            Ok(envelope) => {
                let token = SecretString::from(envelope.data.token);
                self.session.set_token(Some(token.clone()));
                debug!("access token refreshed");
                Some(token)
            }
            Err(e) => {
                warn!(error = %e, "no token in refresh response");
                None
            }
        }
    }
}

impl<T: Transport> Transport for AuthTransport<T> {
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, TransportError> {
        // Absence of a token is not an error here - unauthenticated calls
        // go out bare and the server decides.
        if request.bearer.is_none() {
            request.bearer = self.session.bearer_token();
        }

        let response = self.inner.send(request.clone()).await?;
        if response.status != UNAUTHORIZED || request.retried {
            return Ok(response);
        }

        debug!(path = %request.path, "request unauthorized, starting refresh cycle");
        request.retried = true;

        match self.refresh_access_token().await {
            Some(token) => {
                request.bearer = Some(token);
                let retried = self.inner.send(request).await?;
                if retried.status == UNAUTHORIZED {
                    // Refresh exhausted: the new token was rejected too.
                    warn!("retried request rejected, clearing session");
                    self.session.logout();
                }
                Ok(retried)
            }
            None => {
                // Refresh failed; the session is dead. Propagate the
                // original rejection rather than swallowing it.
                self.session.logout();
                Ok(response)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use shopfront_core::{RoleId, User, UserId};

    /// Scripted transport: pops canned responses and records every request.
    struct ScriptedTransport {
        responses: Mutex<VecDeque<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<ApiResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for &ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Other("script exhausted".to_string()))
        }
    }

    fn ok(body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    fn status(status: u16) -> ApiResponse {
        ApiResponse {
            status,
            body: Vec::new(),
        }
    }

    fn refreshed(token: &str) -> ApiResponse {
        ok(serde_json::json!({ "data": { "token": token } }))
    }

    fn logged_in_session() -> SessionStore {
        let session = SessionStore::new();
        session.login(
            User {
                id: UserId::new(1),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                role_id: RoleId::new(2),
            },
            SecretString::from("stale-token"),
            Some(SecretString::from("refresh-credential")),
        );
        session
    }

    fn bearer_of(request: &ApiRequest) -> Option<String> {
        request
            .bearer
            .as_ref()
            .map(|token| token.expose_secret().to_string())
    }

    #[tokio::test]
    async fn test_attaches_bearer_when_token_present() {
        let script = ScriptedTransport::new(vec![ok(serde_json::json!({"data": []}))]);
        let transport = AuthTransport::new(&script, logged_in_session());

        transport.send(ApiRequest::get("/products")).await.unwrap();

        let requests = script.requests();
        assert_eq!(bearer_of(requests.first().unwrap()).unwrap(), "stale-token");
    }

    #[tokio::test]
    async fn test_no_token_sends_bare_request() {
        let script = ScriptedTransport::new(vec![ok(serde_json::json!({"data": []}))]);
        let transport = AuthTransport::new(&script, SessionStore::new());

        transport.send(ApiRequest::get("/products")).await.unwrap();

        assert!(script.requests().first().unwrap().bearer.is_none());
    }

    #[tokio::test]
    async fn test_refresh_and_retry_end_to_end() {
        let script = ScriptedTransport::new(vec![
            status(401),
            refreshed("fresh-token"),
            ok(serde_json::json!({"data": {"id": 1}})),
        ]);
        let session = logged_in_session();
        let transport = AuthTransport::new(&script, session.clone());

        let response = transport.send(ApiRequest::get("/transactions")).await.unwrap();

        // The caller never observes the 401
        assert_eq!(response.status, 200);

        let requests = script.requests();
        assert_eq!(requests.len(), 3);

        // Exactly one refresh call, carrying the refresh credential, bare
        let refresh = requests.get(1).unwrap();
        assert_eq!(refresh.path, "/auth/refresh-token");
        assert!(refresh.bearer.is_none());

        // Exactly one retry, flagged, carrying the fresh token
        let retry = requests.get(2).unwrap();
        assert!(retry.retried);
        assert_eq!(retry.path, "/transactions");
        assert_eq!(bearer_of(retry).unwrap(), "fresh-token");

        // New token was written into the session store
        assert_eq!(
            session.bearer_token().unwrap().expose_secret(),
            "fresh-token"
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session_and_surfaces_original_error() {
        let script = ScriptedTransport::new(vec![status(401), status(401)]);
        let session = logged_in_session();
        let transport = AuthTransport::new(&script, session.clone());

        let response = transport.send(ApiRequest::get("/transactions")).await.unwrap();

        // Original rejection propagates, not the refresh failure
        assert_eq!(response.status, 401);
        assert_eq!(script.requests().len(), 2);

        // Session fully cleared: token, refresh token, user all absent
        assert!(session.bearer_token().is_none());
        assert!(session.refresh_token().is_none());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_missing_refresh_credential_fails_without_refresh_call() {
        let script = ScriptedTransport::new(vec![status(401)]);
        let session = SessionStore::new();
        session.set_token(Some(SecretString::from("stale-token")));
        let transport = AuthTransport::new(&script, session.clone());

        let response = transport.send(ApiRequest::get("/transactions")).await.unwrap();

        assert_eq!(response.status, 401);
        // No refresh call was attempted
        assert_eq!(script.requests().len(), 1);
        assert!(session.bearer_token().is_none());
    }

    #[tokio::test]
    async fn test_retried_request_is_never_retried_again() {
        let script = ScriptedTransport::new(vec![
            status(401),
            refreshed("fresh-token"),
            status(401),
        ]);
        let session = logged_in_session();
        let transport = AuthTransport::new(&script, session.clone());

        let response = transport.send(ApiRequest::get("/transactions")).await.unwrap();

        // Second 401 propagates as-is; exactly three dispatches, no loop
        assert_eq!(response.status, 401);
        assert_eq!(script.requests().len(), 3);

        // Refresh is exhausted, so the session is gone
        assert!(session.bearer_token().is_none());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_malformed_refresh_body_counts_as_refresh_failure() {
        let script = ScriptedTransport::new(vec![
            status(401),
            ok(serde_json::json!({ "data": {} })),
        ]);
        let session = logged_in_session();
        let transport = AuthTransport::new(&script, session.clone());

        let response = transport.send(ApiRequest::get("/transactions")).await.unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(script.requests().len(), 2);
        assert!(session.bearer_token().is_none());
    }

    #[tokio::test]
    async fn test_success_passes_through_unchanged() {
        let body = serde_json::json!({"data": {"id": 7}});
        let script = ScriptedTransport::new(vec![ok(body.clone())]);
        let transport = AuthTransport::new(&script, logged_in_session());

        let response = transport.send(ApiRequest::get("/transactions/7")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.json::<serde_json::Value>().unwrap(), body);
    }
}
