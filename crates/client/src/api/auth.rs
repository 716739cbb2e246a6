//! Authentication operations.
//!
//! Token refresh is not here - it lives inside the transport, where the
//! 401-triggered refresh cycle runs without involving the caller.

use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::User;

use crate::api::ApiClient;
use crate::error::Result;
use crate::transport::{ApiRequest, Method, Transport};

#[derive(Debug, Deserialize)]
struct LoginData {
    user: User,
    token: String,
    // Older API revisions issue no refresh token; the session then simply
    // cannot be refreshed and dies on the first 401.
    #[serde(default)]
    refresh_token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    /// Log in with email and password.
    ///
    /// On success the session store is populated atomically with the user,
    /// bearer token, and refresh token, and persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request
    /// fails; the session is left untouched in that case.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = ApiRequest::json(
            Method::Post,
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        );
        let data: LoginData = self.execute(request).await?;

        self.session().login(
            data.user.clone(),
            SecretString::from(data.token),
            data.refresh_token.map(SecretString::from),
        );
        Ok(data.user)
    }

    /// Log out locally.
    ///
    /// Clears the session store; the token is not invalidated server-side.
    pub fn logout(&self) {
        self.session().logout();
    }
}
