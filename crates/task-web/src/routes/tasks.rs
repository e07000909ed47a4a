//! Task proxy routes.
//!
//! The browser-facing REST surface. Each handler builds a per-request
//! [`TaskApiClient`] bound to the caller's bearer token and forwards to the
//! external backend; creation payloads are validated first, so a bad form
//! never produces an upstream request.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use task_client::{MemoryTokenStore, Session, TaskApiClient, TaskBackend, TaskFilter};
use task_core::{validation, CompletionStatus, Task, TaskCreate, TaskUpdate};

use crate::error::{Result, WebError};
use crate::state::AppState;

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(WebError::AuthRequired)
}

/// Per-request backend client carrying the caller's session.
pub fn backend_for(state: &AppState, token: String, user_id: &str) -> TaskApiClient {
    let store = Arc::new(MemoryTokenStore::with_session(Session::new(token, user_id)));
    TaskApiClient::with_client(state.http.clone(), &state.backend_url, store)
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// `GET /api/{user_id}/tasks`
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>> {
    let token = bearer_token(&headers)?;
    let filter = TaskFilter {
        status: query.status,
        priority: query.priority,
    };

    let tasks = backend_for(&state, token, &user_id)
        .list_tasks(&user_id, &filter)
        .await?;
    Ok(Json(tasks))
}

/// `POST /api/{user_id}/tasks`
pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<TaskCreate>,
) -> Result<Json<Task>> {
    let token = bearer_token(&headers)?;
    validation::validate_create(&payload, Utc::now()).map_err(WebError::Validation)?;

    let task = backend_for(&state, token, &user_id)
        .create_task(&user_id, &payload)
        .await?;
    Ok(Json(task))
}

/// `GET /api/{user_id}/tasks/{task_id}`
pub async fn get_one(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Task>> {
    let token = bearer_token(&headers)?;
    let task = backend_for(&state, token, &user_id)
        .get_task(&user_id, &task_id)
        .await?;
    Ok(Json(task))
}

/// `PUT /api/{user_id}/tasks/{task_id}`
pub async fn update(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<TaskUpdate>,
) -> Result<Json<Task>> {
    let token = bearer_token(&headers)?;
    validation::validate_update(&payload, Utc::now()).map_err(WebError::Validation)?;

    let task = backend_for(&state, token, &user_id)
        .update_task(&user_id, &task_id, &payload)
        .await?;
    Ok(Json(task))
}

/// `DELETE /api/{user_id}/tasks/{task_id}`
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let token = bearer_token(&headers)?;
    backend_for(&state, token, &user_id)
        .delete_task(&user_id, &task_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// `PATCH /api/{user_id}/tasks/{task_id}/complete`
pub async fn complete(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<CompletionStatus>,
) -> Result<Json<CompletionStatus>> {
    let token = bearer_token(&headers)?;
    let status = backend_for(&state, token, &user_id)
        .complete_task(&user_id, &task_id, body.completed)
        .await?;
    Ok(Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_header_rejected() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, WebError::AuthRequired));
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let err = bearer_token(&headers_with("Basic abc123")).unwrap_err();
        assert!(matches!(err, WebError::AuthRequired));
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = bearer_token(&headers_with("Bearer ")).unwrap_err();
        assert!(matches!(err, WebError::AuthRequired));
    }
}
