//! HTML page routes.
//!
//! Pages are server-rendered shells; the static JS drives all data fetching
//! against the `/api` routes using the browser-held session.

use askama::Template;

/// Task list page template.
#[derive(Template)]
#[template(path = "tasks.html")]
pub struct TasksTemplate;

/// Chat assistant page template.
#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate;

/// Sign-in page template.
#[derive(Template)]
#[template(path = "sign_in.html")]
pub struct SignInTemplate;

/// Sign-up page template.
#[derive(Template)]
#[template(path = "sign_up.html")]
pub struct SignUpTemplate;

/// Render the task list page.
pub async fn tasks_page() -> TasksTemplate {
    TasksTemplate
}

/// Render the chat page.
pub async fn chat_page() -> ChatTemplate {
    ChatTemplate
}

/// Render the sign-in page.
pub async fn sign_in_page() -> SignInTemplate {
    SignInTemplate
}

/// Render the sign-up page.
pub async fn sign_up_page() -> SignUpTemplate {
    SignUpTemplate
}
