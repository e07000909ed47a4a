//! Auth service client (register / login).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ClientError;

/// Response of both auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token for subsequent REST calls.
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for the external auth service.
///
/// Endpoints: `POST {base}/auth/register` and `POST {base}/auth/login`.
/// These calls are unauthenticated; the returned token is what later task
/// calls attach.
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Register a new account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ClientError> {
        debug!(email, "Registering user");
        self.post(
            "register",
            &RegisterRequest {
                email,
                password,
                name,
            },
        )
        .await
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        debug!(email, "Logging in user");
        self.post("login", &LoginRequest { email, password }).await
    }

    async fn post<B: Serialize>(&self, action: &str, body: &B) -> Result<AuthResponse, ClientError> {
        let url = format!("{}/auth/{}", self.base_url, action);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }
}
