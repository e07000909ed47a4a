//! Auth proxy routes.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use task_client::AuthResponse;

use crate::error::Result;
use crate::state::AppState;

/// Registration request from the browser.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login request from the browser.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new account against the auth service.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let response = state
        .auth_client()
        .register(&req.email, &req.password, &req.name)
        .await?;
    info!(user_id = %response.id, "User registered");
    Ok(Json(response))
}

/// Sign in with email and password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let response = state.auth_client().login(&req.email, &req.password).await?;
    info!(user_id = %response.id, "User signed in");
    Ok(Json(response))
}
