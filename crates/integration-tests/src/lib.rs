//! Test support for driving the client end-to-end without a network.
//!
//! [`ScriptedTransport`] stands in for the HTTP layer: tests queue canned
//! responses, run real [`shopfront_client::ApiClient`] calls against it,
//! and inspect the requests that went out.

// Test-support crate: panicking on malformed fixtures is the right failure mode.
#![allow(clippy::unwrap_used)]
#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use shopfront_client::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use shopfront_core::{Price, Product, ProductId, RoleId, User, UserId};

/// In-memory transport that pops queued responses and records every
/// request. Cloneable so tests can keep a handle after moving one into a
/// client.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new(responses: Vec<ApiResponse>) -> Self {
        Self {
            inner: Arc::new(ScriptState {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Queue another response behind any already scripted.
    pub fn push(&self, response: ApiResponse) {
        self.inner.responses.lock().unwrap().push_back(response);
    }

    /// Every request dispatched so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.inner.requests.lock().unwrap().push(request);
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Other("script exhausted".to_string()))
    }
}

/// A 200 response with `body` wrapped in the `{ "data": ... }` envelope.
#[must_use]
pub fn data(body: serde_json::Value) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: serde_json::to_vec(&serde_json::json!({ "data": body })).unwrap(),
    }
}

/// A bodyless response with the given status.
#[must_use]
pub fn status(status: u16) -> ApiResponse {
    ApiResponse {
        status,
        body: Vec::new(),
    }
}

/// A successful refresh response carrying `token`.
#[must_use]
pub fn refreshed(token: &str) -> ApiResponse {
    data(serde_json::json!({ "token": token }))
}

/// The customer account used across tests.
#[must_use]
pub fn customer() -> User {
    User {
        id: UserId::new(1),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        role_id: RoleId::new(2),
    }
}

/// A successful login response for [`customer`].
#[must_use]
pub fn login_response(token: &str, refresh_token: &str) -> ApiResponse {
    data(serde_json::json!({
        "user": {
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "role_id": 2,
        },
        "token": token,
        "refresh_token": refresh_token,
    }))
}

/// A catalog product fixture.
#[must_use]
pub fn product(id: i32, name: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from(price),
        stock: 10,
        image: None,
    }
}

/// A `GET /products` response listing `products`.
#[must_use]
pub fn catalog(products: &[Product]) -> ApiResponse {
    data(serde_json::to_value(products).unwrap())
}
