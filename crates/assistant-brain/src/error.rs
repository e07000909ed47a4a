//! Error types for assistant operations.

use thiserror::Error;

/// Errors that can occur while talking to the LLM provider.
///
/// Function-execution failures against the task backend are deliberately
/// NOT represented here; they become a failed [`crate::TaskActionResult`]
/// and flow back through the conversation.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request-level network failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered, but the exchange could not be completed.
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}
