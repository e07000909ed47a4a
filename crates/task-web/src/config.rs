//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use assistant_brain::{AssistantConfig, AssistantError};

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Base URL of the task/auth REST backend.
    pub backend_url: String,
    /// Assistant (chat-completion) configuration.
    pub assistant: AssistantConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TODO_WEB_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `BACKEND_API_URL` | REST backend base URL | `http://127.0.0.1:8000/api` |
    ///
    /// The assistant additionally reads the `OPENAI_*` variables; see
    /// [`AssistantConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("TODO_WEB_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let backend_url = env::var("BACKEND_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());

        let assistant = AssistantConfig::from_env()?;

        Ok(Self {
            addr,
            backend_url,
            assistant,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TODO_WEB_ADDR format")]
    InvalidAddr,

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}
