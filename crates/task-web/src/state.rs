//! Application state shared across handlers.

use std::sync::Arc;

use assistant_brain::TaskAssistant;
use reqwest::Client;
use task_client::AuthClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The AI assistant (shared; per-request agents are built around it).
    pub assistant: Arc<TaskAssistant>,
    /// Base URL of the task/auth REST backend.
    pub backend_url: String,
    /// Shared HTTP client for proxy calls.
    pub http: Client,
}

impl AppState {
    /// Create new application state.
    pub fn new(assistant: Arc<TaskAssistant>, backend_url: impl Into<String>) -> Self {
        Self {
            assistant,
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Auth client against the configured backend.
    pub fn auth_client(&self) -> AuthClient {
        AuthClient::with_client(self.http.clone(), &self.backend_url)
    }
}
