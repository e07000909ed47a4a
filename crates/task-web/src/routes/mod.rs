//! Route handlers for the web server.

pub mod auth;
pub mod chat;
pub mod health;
pub mod pages;
pub mod tasks;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(pages::tasks_page))
        .route("/chat", get(pages::chat_page))
        .route("/sign-in", get(pages::sign_in_page))
        .route("/sign-up", get(pages::sign_up_page))
        // Health check
        .route("/health", get(health::health))
        // Auth proxy
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Task proxy
        .route(
            "/api/:user_id/tasks",
            get(tasks::list).post(tasks::create),
        )
        .route(
            "/api/:user_id/tasks/:task_id",
            get(tasks::get_one).put(tasks::update).delete(tasks::remove),
        )
        .route(
            "/api/:user_id/tasks/:task_id/complete",
            patch(tasks::complete),
        )
        // AI assistant
        .route("/api/chat", post(chat::chat))
}
