//! AI assistant chat route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use assistant_brain::api_types::ChatMessage;
use assistant_brain::TaskAgent;

use crate::error::{Result, WebError};
use crate::routes::tasks::{backend_for, bearer_token};
use crate::state::AppState;

/// Chat request from the browser.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Chat response carrying the assistant's reply text.
#[derive(Serialize)]
pub struct ChatResponse {
    pub content: String,
}

/// `POST /api/chat`
///
/// Runs the assistant's two-call flow with a per-request agent bound to the
/// caller's bearer token, so any function the model selects acts on the
/// caller's own tasks.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let token = bearer_token(&headers)?;
    let user_id = req
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or(WebError::MissingUserId)?;

    info!(user_id = %user_id, messages = req.messages.len(), "Chat request");

    let backend = Arc::new(backend_for(&state, token, &user_id));
    let agent = TaskAgent::new(backend, user_id);

    let content = state.assistant.respond(req.messages, &agent).await?;
    Ok(Json(ChatResponse { content }))
}
