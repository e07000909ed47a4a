//! HTTP clients for the external services the todo web app consumes.
//!
//! - [`TaskApiClient`] - one method per REST operation on the task backend,
//!   each attaching a bearer token read from the session store
//! - [`AuthClient`] - register/login against the auth service
//! - [`TokenStore`] - the persisted session (bearer token + user id)
//!
//! Every call is a single best-effort request: no retry, no caching. A
//! missing token fails before any network I/O; a non-2xx response becomes a
//! [`ClientError::Api`] carrying the backend's `detail` message when present.

mod auth;
mod error;
mod session;
mod tasks;

pub use auth::{AuthClient, AuthResponse};
pub use error::ClientError;
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use tasks::{TaskApiClient, TaskBackend, TaskFilter};

// Re-export async_trait for downstream TaskBackend impls
pub use async_trait::async_trait;
