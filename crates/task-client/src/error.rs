//! Error types for backend and auth calls.

use thiserror::Error;

/// Errors produced by the task and auth clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token in the session store; the call was never sent.
    #[error("No authentication token. Please sign in again.")]
    MissingToken,

    /// The backend answered with a non-2xx status.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Request-level failure (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session store read/write failure.
    #[error("Session store error: {0}")]
    Store(String),
}

impl ClientError {
    /// The message to surface to the user, preferring the backend's
    /// `detail` text.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Api { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// The upstream HTTP status, if this was an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
