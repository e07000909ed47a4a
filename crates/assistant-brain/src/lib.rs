//! LLM-backed task assistant.
//!
//! This crate implements the natural-language side of the todo app:
//!
//! - [`TaskAssistant`] - the two-call chat-completion flow: one request with
//!   the declared task functions, an optional function dispatch against the
//!   REST backend, and a follow-up request for the natural-language reply
//! - [`TaskAgent`] - dispatches a model-selected function call to the task
//!   backend, swallowing failures into a structured result so the
//!   conversation continues instead of erroring out
//! - [`functions`] - the five declared functions with their JSON schemas
//! - [`api_types`] - chat-completion request/response wire types
//!
//! # Example
//!
//! ```rust,ignore
//! use assistant_brain::{AssistantConfig, TaskAgent, TaskAssistant};
//! use task_client::{MemoryTokenStore, Session, TaskApiClient};
//! use std::sync::Arc;
//!
//! let assistant = TaskAssistant::new(AssistantConfig::from_env()?)?;
//! let store = Arc::new(MemoryTokenStore::with_session(Session::new(token, &user_id)));
//! let backend = Arc::new(TaskApiClient::new(backend_url, store));
//! let agent = TaskAgent::new(backend, user_id);
//! let reply = assistant.respond(messages, &agent).await?;
//! ```

pub mod api_types;
mod agent;
mod assistant;
mod config;
mod error;
pub mod functions;

pub use agent::{TaskActionResult, TaskAgent};
pub use assistant::{ChatApi, OpenAiClient, TaskAssistant, FALLBACK_REPLY};
pub use config::AssistantConfig;
pub use error::AssistantError;

// Re-export async_trait for ChatApi impls
pub use async_trait::async_trait;
