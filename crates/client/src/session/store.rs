//! Persistence for the session slot.
//!
//! The slot holds the API key handed out by the last successful session
//! check, plus the backend cookies so a cookie session outlives the process.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;

/// Contents of the session slot.
///
/// Implements `Debug` manually to redact the API key and cookies.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// API key from the last successful session check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Backend cookies as a `Cookie` header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cookies", &self.cookies.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Where the session slot lives.
pub trait SessionStore: Send + Sync {
    /// Read the slot. An empty slot is `StoredSession::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the slot exists but cannot be read.
    fn load(&self) -> Result<StoredSession, ClientError>;

    /// Overwrite the slot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the slot cannot be written.
    fn save(&self, session: &StoredSession) -> Result<(), ClientError>;
}

/// Session slot kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<StoredSession>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-filled slot.
    #[must_use]
    pub const fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredSession, ClientError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        Ok(())
    }
}

/// Session slot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<StoredSession, ClientError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredSession::default());
            }
            Err(e) => {
                return Err(ClientError::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            ClientError::Store(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::Store(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Store(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            ClientError::Store(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}
