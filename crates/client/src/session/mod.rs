//! Session context and its lifecycle.
//!
//! [`SessionManager`] is the only owner of the persisted session slot: it
//! writes the API key after a successful session check, hands it out to the
//! forecast submitter, and keeps the backend cookies in step with the slot.
//!
//! The API key is never cleared. Logging out ends the server-side session
//! only, so a stale key stays in the slot until the next session check
//! overwrites it.

mod store;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::config::Route;
use crate::error::ClientError;
use crate::page::Page;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};

/// API key issued at session-check time.
///
/// Wraps a [`SecretString`] so it stays out of `Debug` output and logs.
#[derive(Debug, Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }
}

impl ExposeSecret<str> for ApiKey {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

/// An active, server-acknowledged session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub api_key: Option<ApiKey>,
}

/// Owns the persisted session slot.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Load persisted cookies into the client's jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    pub fn restore(&self, api: &ApiClient) -> Result<(), ClientError> {
        if let Some(cookies) = self.store.load()?.cookies {
            api.restore_cookies(&cookies);
            debug!("Restored backend cookies");
        }
        Ok(())
    }

    /// Save the client's current cookies into the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or written.
    pub fn persist_cookies(&self, api: &ApiClient) -> Result<(), ClientError> {
        let mut stored = self.store.load()?;
        stored.cookies = api.cookies();
        self.store.save(&stored)
    }

    /// The API key from the last successful session check, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    pub fn api_key(&self) -> Result<Option<ApiKey>, ClientError> {
        Ok(self.store.load()?.api_key.map(ApiKey::new))
    }

    /// Verify the session with the backend.
    ///
    /// When logged out, navigates to the landing page and returns `None`.
    /// When logged in, greets the user and persists the API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response is unreadable, or
    /// the slot cannot be written.
    #[instrument(skip_all)]
    pub async fn check(
        &self,
        api: &ApiClient,
        page: &dyn Page,
    ) -> Result<Option<Session>, ClientError> {
        let status = api.check_session().await?;

        if !status.logged_in {
            info!("Not logged in, redirecting to landing page");
            page.navigate(Route::Landing);
            self.persist_cookies(api)?;
            return Ok(None);
        }

        let username = status.username.unwrap_or_default();
        page.set_user_info(&format!("Hello, {username}"));

        let mut stored = self.store.load()?;
        stored.api_key.clone_from(&status.api_key);
        stored.cookies = api.cookies();
        self.store.save(&stored)?;

        info!(%username, "Session active");

        Ok(Some(Session {
            username,
            api_key: status.api_key.map(ApiKey::new),
        }))
    }
}
