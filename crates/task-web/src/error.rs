//! Error types for the web server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use assistant_brain::AssistantError;
use task_client::ClientError;
use task_core::FieldError;

/// Errors that can occur in web handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// Missing or malformed bearer token on a protected route.
    #[error("Authentication required")]
    AuthRequired,

    /// The chat request did not carry a user id.
    #[error("User ID is required")]
    MissingUserId,

    /// Client-side validation rejected the payload before any upstream call.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Upstream backend or auth call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Assistant processing failed.
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::AuthRequired => error_json(
                StatusCode::UNAUTHORIZED,
                "error",
                "Authentication required".to_string(),
            ),
            WebError::MissingUserId => error_json(
                StatusCode::BAD_REQUEST,
                "error",
                "User ID is required".to_string(),
            ),
            WebError::Validation(errors) => {
                let detail = errors
                    .iter()
                    .map(|e| e.message.clone())
                    .collect::<Vec<_>>()
                    .join("; ");
                error_json(StatusCode::UNPROCESSABLE_ENTITY, "detail", detail)
            }
            WebError::Client(ClientError::MissingToken) => error_json(
                StatusCode::UNAUTHORIZED,
                "error",
                "Authentication required".to_string(),
            ),
            WebError::Client(ClientError::Api { status, detail }) => {
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                error_json(status, "detail", detail)
            }
            WebError::Client(err) => {
                tracing::error!("Upstream request failed: {}", err);
                error_json(StatusCode::BAD_GATEWAY, "detail", err.detail())
            }
            WebError::Assistant(err) => {
                tracing::error!("Assistant error: {}", err);
                error_json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error",
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

fn error_json(status: StatusCode, key: &str, message: String) -> Response {
    let body = serde_json::json!({ key: message });
    (status, Json(body)).into_response()
}

/// Result type for web handlers.
pub type Result<T> = std::result::Result<T, WebError>;
