//! Web server for the todo app.
//!
//! Serves the HTML pages, proxies task and auth CRUD to the external REST
//! backend, and exposes the AI chat route.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use assistant_brain::TaskAssistant;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, backend = %config.backend_url, "Starting web server");

    // Build the assistant
    let assistant = Arc::new(TaskAssistant::new(config.assistant.clone())?);

    // Build application state
    let state = AppState::new(assistant, &config.backend_url);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
