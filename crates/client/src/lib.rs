//! Shopfront client library.
//!
//! A presentation-and-state-synchronization layer over the remote storefront
//! API. Three pieces carry the logic; everything else is typed plumbing:
//!
//! - [`session::SessionStore`] - authenticated user, bearer token, and
//!   refresh token, persisted to a namespaced JSON file across restarts
//! - [`cart::CartStore`] - ordered line items keyed by product id, with
//!   merge-on-add and subtotal recomputation
//! - [`transport::AuthTransport`] - decorator over an abstract transport
//!   that attaches the bearer token and performs at most one
//!   refresh-and-retry cycle when a request comes back 401
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ApiClient, ClientConfig, SessionStore};
//!
//! let config = ClientConfig::from_env()?;
//! let session = SessionStore::open(config.session_path().unwrap());
//! let client = ApiClient::new(&config, session.clone())?;
//!
//! client.login("alice@example.com", "hunter2").await?;
//! let products = client.list_products().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use api::{ApiClient, ImageUpload, NewProduct};
pub use cart::CartStore;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result};
pub use session::{Session, SessionStore};
pub use transport::{AuthTransport, HttpTransport, Transport, TransportError};
