// SPDX-License-Identifier: MPL-2.0
//! Client session state.
//!
//! [`SessionStore`] tracks whether the running instance is logged in and
//! mirrors the identity into a [`KeyValueStore`] so it survives restarts.
//! Login and logout simulate a remote round trip with a configurable delay;
//! neither performs any credential verification (that is the login form's
//! job, see [`crate::forms::login`]).
//!
//! The store is constructed once at startup and shared by reference
//! (`Arc<SessionStore<_>>`) with whatever needs it.

use crate::config::Config;
use crate::storage::KeyValueStore;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Storage key holding the logged-in username.
pub const USER_KEY: &str = "showcase.auth.user";

/// Storage key holding the opaque session token.
pub const TOKEN_KEY: &str = "showcase.auth.token";

/// Username/password pair as entered in the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<String>,
    pub token: Option<String>,
}

impl Session {
    /// A session is authenticated iff it carries a user.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Simulated latency of the login/logout round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub login_delay: Duration,
    pub logout_delay: Duration,
}

impl SessionConfig {
    /// No artificial delay at all.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            login_delay: Duration::ZERO,
            logout_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            login_delay: config.login_delay(),
            logout_delay: config.logout_delay(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

struct Inner<S> {
    storage: S,
    session: Session,
}

/// Authentication state backed by durable storage.
pub struct SessionStore<S: KeyValueStore> {
    inner: Mutex<Inner<S>>,
    config: SessionConfig,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Creates the store and hydrates it from `storage`.
    pub fn new(storage: S, config: SessionConfig) -> Self {
        let session = Session {
            user: storage.get(USER_KEY),
            token: storage.get(TOKEN_KEY),
        };
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "session hydrated from storage"
        );
        Self {
            inner: Mutex::new(Inner { storage, session }),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // State is two Option<String>s; a panic mid-update cannot leave it torn.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Marks `credentials.username` as logged in with `token`.
    pub async fn login(&self, credentials: &Credentials, token: impl Into<String>) {
        let token = token.into();
        tokio::time::sleep(self.config.login_delay).await;

        let mut inner = self.lock();
        inner.storage.set(USER_KEY, &credentials.username);
        inner.storage.set(TOKEN_KEY, &token);
        inner.session = Session {
            user: Some(credentials.username.clone()),
            token: Some(token),
        };
        tracing::info!(user = %credentials.username, "logged in");
    }

    /// Clears the stored identity.
    pub async fn logout(&self) {
        tokio::time::sleep(self.config.logout_delay).await;

        let mut inner = self.lock();
        inner.storage.remove(USER_KEY);
        inner.storage.remove(TOKEN_KEY);
        let previous = inner.session.user.take();
        inner.session.token = None;
        tracing::info!(user = ?previous, "logged out");
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    #[must_use]
    pub fn user(&self) -> Option<String> {
        self.lock().session.user.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().session.token.clone()
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Tears the store down and hands the storage back.
    pub fn into_storage(self) -> S {
        self.inner
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .storage
    }
}
