//! Persisted session state (bearer token + user id).
//!
//! The browser pages keep these under fixed localStorage keys; native
//! callers get the same contract through [`TokenStore`], with a file-backed
//! implementation using the same key names and an in-memory one for
//! per-request tokens on the server.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the user id.
pub const USER_ID_KEY: &str = "user_id";

/// A signed-in session. No expiry or refresh logic; the token is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}

/// Source of the current session, read on every API call.
pub trait TokenStore: Send + Sync {
    /// The bearer token, if signed in.
    fn token(&self) -> Option<String>;

    /// The signed-in user id, if any.
    fn user_id(&self) -> Option<String>;

    /// Persist a session (sign-in).
    fn store(&self, session: &Session) -> Result<(), ClientError>;

    /// Drop the session (sign-out).
    fn clear(&self) -> Result<(), ClientError>;
}

/// In-memory store; used for per-request tokens on the server side.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: RwLock<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the given session.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.session
            .read()
            .ok()?
            .as_ref()
            .map(|s| s.token.clone())
    }

    fn user_id(&self) -> Option<String> {
        self.session
            .read()
            .ok()?
            .as_ref()
            .map(|s| s.user_id.clone())
    }

    fn store(&self, session: &Session) -> Result<(), ClientError> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| ClientError::Store("session lock poisoned".to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| ClientError::Store("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// On-disk JSON document matching the browser's localStorage keys.
#[derive(Serialize, Deserialize, Default)]
struct StoredSession {
    #[serde(rename = "auth_token", skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(rename = "user_id", skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

/// File-backed store. The session is re-read on every call, like
/// localStorage, so external sign-out takes effect immediately.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Option<StoredSession> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write(&self, stored: &StoredSession) -> Result<(), ClientError> {
        let content = serde_json::to_string_pretty(stored)
            .map_err(|e| ClientError::Store(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| ClientError::Store(e.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.read()?.token
    }

    fn user_id(&self) -> Option<String> {
        self.read()?.user_id
    }

    fn store(&self, session: &Session) -> Result<(), ClientError> {
        self.write(&StoredSession {
            token: Some(session.token.clone()),
            user_id: Some(session.user_id.clone()),
        })
    }

    fn clear(&self) -> Result<(), ClientError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| ClientError::Store(e.to_string()))?;
        }
        Ok(())
    }
}
