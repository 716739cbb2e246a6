//! Command implementations, grouped per resource like the API client.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use thiserror::Error;

use shopfront_client::{
    ApiClient, ApiError, CartStore, ClientConfig, ConfigError, SessionStore, TransportError,
};

/// Errors any command can surface. All of them end the process with a
/// printed notice and a non-zero exit; none panic.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is missing or malformed.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The API rejected the request.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The command requires a logged-in session.
    #[error("not logged in, run `shopfront login` first")]
    NotLoggedIn,

    /// The command requires an administrator account.
    #[error("this command requires an administrator account")]
    AdminRequired,

    /// A product id was not found in the catalog.
    #[error("no product with id {0} in the catalog")]
    UnknownProduct(i32),

    /// A command argument did not parse.
    #[error("invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },

    /// An image file could not be read.
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        source: std::io::Error,
    },
}

/// Shared command context: one API client and one cart store, both backed
/// by the configured state directory when present.
pub struct Context {
    pub client: ApiClient,
    pub cart: CartStore,
}

impl Context {
    /// Build the context from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or the HTTP client
    /// cannot be constructed.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;

        let session = match config.session_path() {
            Some(path) => SessionStore::open(path),
            None => SessionStore::new(),
        };
        let cart = match config.cart_path() {
            Some(path) => CartStore::open(path),
            None => CartStore::new(),
        };

        let client = ApiClient::new(&config, session)?;
        Ok(Self { client, cart })
    }

    /// The logged-in user, or [`CliError::NotLoggedIn`].
    pub fn current_user(&self) -> Result<shopfront_core::User, CliError> {
        self.client.session().user().ok_or(CliError::NotLoggedIn)
    }

    /// Guard for admin-only commands.
    pub fn require_admin(&self) -> Result<(), CliError> {
        let user = self.current_user()?;
        if user.is_admin() {
            Ok(())
        } else {
            Err(CliError::AdminRequired)
        }
    }
}
