//! Task REST backend client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use task_core::{CompletionStatus, Task, TaskCreate, TaskUpdate};

use crate::{ClientError, TokenStore};

/// Optional filters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// "completed" or "pending"; absent means all.
    pub status: Option<String>,
    /// "high", "medium" or "low"; absent means all.
    pub priority: Option<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }
}

/// Error body shape of the REST backend.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// The six REST operations on the task backend, as a seam so the assistant
/// agent and tests can substitute implementations.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn list_tasks(&self, user_id: &str, filter: &TaskFilter)
        -> Result<Vec<Task>, ClientError>;
    async fn create_task(&self, user_id: &str, payload: &TaskCreate) -> Result<Task, ClientError>;
    async fn get_task(&self, user_id: &str, task_id: &str) -> Result<Task, ClientError>;
    async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        payload: &TaskUpdate,
    ) -> Result<Task, ClientError>;
    async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<(), ClientError>;
    async fn complete_task(
        &self,
        user_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<CompletionStatus, ClientError>;
}

/// Client for the task REST backend.
///
/// Paths follow `/{user_id}/tasks[/{task_id}][/complete]` under the base
/// URL. Every call reads the bearer token from the session store first; a
/// missing token fails immediately, before any network request.
pub struct TaskApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl TaskApiClient {
    /// Create a client with its own connection pool.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Client::new(), base_url, store)
    }

    /// Create a client sharing an existing reqwest client.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> Result<String, ClientError> {
        self.store.token().ok_or(ClientError::MissingToken)
    }

    fn url(&self, user_id: &str, tail: &str) -> String {
        format!("{}/{}/tasks{}", self.base_url, user_id, tail)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let token = self.bearer()?;
        let response = request
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }
}

/// Translate a non-2xx response into an error, preferring the body's
/// `detail` field.
fn api_error(status: StatusCode, body: &str) -> ClientError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

    ClientError::Api {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl TaskBackend for TaskApiClient {
    async fn list_tasks(
        &self,
        user_id: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, ClientError> {
        let mut request = self.client.get(self.url(user_id, ""));
        if let Some(ref status) = filter.status {
            request = request.query(&[("status", status)]);
        }
        if let Some(ref priority) = filter.priority {
            request = request.query(&[("priority", priority)]);
        }

        debug!(user_id, ?filter, "Listing tasks");
        self.send_json(request).await
    }

    async fn create_task(&self, user_id: &str, payload: &TaskCreate) -> Result<Task, ClientError> {
        debug!(user_id, title = %payload.title, "Creating task");
        let request = self.client.post(self.url(user_id, "")).json(payload);
        self.send_json(request).await
    }

    async fn get_task(&self, user_id: &str, task_id: &str) -> Result<Task, ClientError> {
        let request = self.client.get(self.url(user_id, &format!("/{}", task_id)));
        self.send_json(request).await
    }

    async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        payload: &TaskUpdate,
    ) -> Result<Task, ClientError> {
        debug!(user_id, task_id, "Updating task");
        let request = self
            .client
            .put(self.url(user_id, &format!("/{}", task_id)))
            .json(payload);
        self.send_json(request).await
    }

    async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<(), ClientError> {
        debug!(user_id, task_id, "Deleting task");
        let request = self
            .client
            .delete(self.url(user_id, &format!("/{}", task_id)));
        self.send(request).await?;
        Ok(())
    }

    async fn complete_task(
        &self,
        user_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<CompletionStatus, ClientError> {
        debug!(user_id, task_id, completed, "Toggling task completion");
        let request = self
            .client
            .patch(self.url(user_id, &format!("/{}/complete", task_id)))
            .json(&CompletionStatus { completed });
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTokenStore;

    fn client_without_token() -> TaskApiClient {
        TaskApiClient::new(
            "http://127.0.0.1:9/api",
            Arc::new(MemoryTokenStore::new()),
        )
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        // Port 9 (discard) would fail with a connect error; MissingToken
        // proves no request was attempted.
        let client = client_without_token();

        let err = client
            .list_tasks("user-1", &TaskFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));

        let err = client
            .create_task("user-1", &TaskCreate::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));

        let err = client.delete_task("user-1", "t-1").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));
    }

    #[test]
    fn test_api_error_uses_detail_field() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Task not found"}"#,
        );
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Task not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        let err = api_error(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "HTTP error! status: 502");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_url_shapes() {
        let client = client_without_token();
        assert_eq!(
            client.url("u-1", ""),
            "http://127.0.0.1:9/api/u-1/tasks"
        );
        assert_eq!(
            client.url("u-1", "/t-9/complete"),
            "http://127.0.0.1:9/api/u-1/tasks/t-9/complete"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TaskApiClient::new(
            "http://localhost:8000/api/",
            Arc::new(MemoryTokenStore::new()),
        );
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }
}
