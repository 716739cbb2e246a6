//! Session store: authenticated user, tokens, and product snapshot.
//!
//! The store is a process-wide record injected into both the UI layer and
//! the HTTP transport - not an ambient global. It survives restarts through
//! a serialize-on-write / deserialize-on-start JSON file.
//!
//! Mutations are infallible: the in-memory state is authoritative and a
//! failed persist only logs a warning. Reads come in two flavors -
//! synchronous snapshots for the transport (which cannot await a re-render)
//! and a `watch` subscription for reactive consumers.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use shopfront_core::{Product, User};

// =============================================================================
// Session record
// =============================================================================

/// The persisted session record.
///
/// `token` absent implies `user` absent in steady state, but the narrow
/// setters can create transient token-without-user states; callers of
/// [`SessionStore::set_token`] and [`SessionStore::set_user`] are
/// responsible for keeping the two coherent. `login`/`logout` always
/// mutate all fields together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, with = "secret_string_opt")]
    token: Option<SecretString>,
    #[serde(default, with = "secret_string_opt")]
    refresh_token: Option<SecretString>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Session {
    /// Current bearer token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Current refresh credential, if any.
    #[must_use]
    pub const fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    /// Currently logged-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Last fetched product snapshot (advisory display data).
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The "has token" view-gating predicate.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The "has admin role" view-gating predicate.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Serde adapter exposing optional secrets for the persisted session file.
mod secret_string_opt {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<SecretString>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SecretString>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
    }
}

// =============================================================================
// SessionStore
// =============================================================================

/// Shared handle to the session record.
///
/// Cheaply cloneable via `Arc`; every mutation runs in a single critical
/// section, notifies `watch` subscribers, and persists the new state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    path: Option<PathBuf>,
    state: RwLock<Session>,
    watch_tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Create an in-memory store with an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(None, Session::default())
    }

    /// Open a store persisted at `path`, loading any existing session.
    ///
    /// A missing or unreadable file yields an empty session - a corrupt
    /// session record is never fatal, it just means logging in again.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let session = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding corrupt session file");
                Session::default()
            }),
            Err(_) => Session::default(),
        };
        Self::with_state(Some(path), session)
    }

    fn with_state(path: Option<PathBuf>, session: Session) -> Self {
        let (watch_tx, _) = watch::channel(session.clone());
        Self {
            inner: Arc::new(SessionStoreInner {
                path,
                state: RwLock::new(session),
                watch_tx,
            }),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Populate the session after a successful login.
    ///
    /// Sets user, token, and refresh token in one critical section.
    pub fn login(&self, user: User, token: SecretString, refresh_token: Option<SecretString>) {
        self.mutate(|session| {
            session.user = Some(user);
            session.token = Some(token);
            session.refresh_token = refresh_token;
        });
    }

    /// Clear user, token, and refresh token.
    ///
    /// The product snapshot is kept - it is advisory display data, not
    /// session state. Does not invalidate the token server-side.
    pub fn logout(&self) {
        self.mutate(|session| {
            session.user = None;
            session.token = None;
            session.refresh_token = None;
        });
    }

    /// Overwrite the bearer token only.
    pub fn set_token(&self, token: Option<SecretString>) {
        self.mutate(|session| session.token = token);
    }

    /// Overwrite the user record only.
    pub fn set_user(&self, user: Option<User>) {
        self.mutate(|session| session.user = user);
    }

    /// Overwrite the product snapshot.
    pub fn set_products(&self, products: Vec<Product>) {
        self.mutate(|session| session.products = products);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Clone the current session state.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    /// Current bearer token, for attaching to outgoing requests.
    #[must_use]
    pub fn bearer_token(&self) -> Option<SecretString> {
        self.read().token.clone()
    }

    /// Current refresh credential.
    #[must_use]
    pub fn refresh_token(&self) -> Option<SecretString> {
        self.read().refresh_token.clone()
    }

    /// Currently logged-in user.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    /// Last fetched product snapshot.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// The "has token" view-gating predicate.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// The "has admin role" view-gating predicate.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read().is_admin()
    }

    /// Subscribe to session changes.
    ///
    /// The receiver yields a full session snapshot after every mutation;
    /// this is the reactive read path for UI consumers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.watch_tx.subscribe()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, apply: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            apply(&mut state);
            state.clone()
        };
        self.inner.watch_tx.send_replace(snapshot.clone());
        self.persist(&snapshot);
    }

    fn persist(&self, session: &Session) {
        let Some(path) = &self.inner.path else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %path.display(), error = %e, "failed to create session state dir");
            return;
        }
        match serde_json::to_vec_pretty(session) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(path, bytes) {
                    warn!(path = %path.display(), error = %e, "failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize session"),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Session's own Debug redacts secrets via SecretString
        f.debug_struct("SessionStore")
            .field("path", &self.inner.path)
            .field("state", &self.snapshot())
            .finish()
    }
}
