//! TaskAssistant implementation: the two-call function-calling flow.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseMessage,
};
use crate::config::AssistantConfig;
use crate::functions::task_functions;
use crate::{AssistantError, TaskAgent};

/// Reply used when the model produces no usable text.
pub const FALLBACK_REPLY: &str = "I didn't understand that. Could you rephrase?";

/// One chat-completion exchange with the LLM provider.
///
/// The assistant is generic over this seam so tests can script responses
/// without a network.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AssistantError>;
}

/// reqwest-backed [`ChatApi`] for an OpenAI-compatible provider.
pub struct OpenAiClient {
    client: Client,
    config: AssistantConfig,
}

impl OpenAiClient {
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder().build().map_err(|e| {
            AssistantError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatApi for OpenAiClient {
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AssistantError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        debug!(model = %request.model, messages = request.messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AssistantError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(AssistantError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AssistantError::ProcessingFailed(format!("Failed to parse response: {}", e))
        })?;

        if let Some(ref usage) = completion.usage {
            debug!(
                prompt = usage.prompt_tokens,
                completion = usage.completion_tokens,
                total = usage.total_tokens,
                "Token usage"
            );
        }

        Ok(completion)
    }
}

/// The AI task assistant.
///
/// One call declares the five task functions with `function_call: "auto"`.
/// If the model selects one, the agent executes it against the REST backend
/// and a second call (without functions) turns the structured outcome into
/// the natural-language reply. The two calls are sequential by design.
pub struct TaskAssistant {
    api: Arc<dyn ChatApi>,
    config: AssistantConfig,
}

impl TaskAssistant {
    /// Create an assistant backed by the OpenAI-compatible provider in the
    /// given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let api = Arc::new(OpenAiClient::new(config.clone())?);
        info!(model = %config.model, "TaskAssistant initialized");
        Ok(Self::with_api(api, config))
    }

    /// Create an assistant over an existing [`ChatApi`].
    pub fn with_api(api: Arc<dyn ChatApi>, config: AssistantConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Run one conversational turn and return the assistant's reply text.
    pub async fn respond(
        &self,
        mut messages: Vec<ChatMessage>,
        agent: &TaskAgent,
    ) -> Result<String, AssistantError> {
        if let Some(ref prompt) = self.config.system_prompt {
            let has_system = messages.first().map(|m| m.role == "system").unwrap_or(false);
            if !has_system {
                messages.insert(0, ChatMessage::system(prompt.clone()));
            }
        }

        let first = self
            .api
            .complete(self.request(messages.clone(), true))
            .await?;

        let message = match first.choices.into_iter().next() {
            Some(choice) => choice.message,
            None => {
                warn!("No choices in completion response");
                return Ok(FALLBACK_REPLY.to_string());
            }
        };

        match message.function_call {
            Some(_) => self.run_function_turn(messages, message, agent).await,
            None => Ok(text_or_fallback(message.content)),
        }
    }

    /// Execute the selected function and ask the model for the follow-up.
    async fn run_function_turn(
        &self,
        mut messages: Vec<ChatMessage>,
        message: ResponseMessage,
        agent: &TaskAgent,
    ) -> Result<String, AssistantError> {
        // Checked by the caller.
        let call = match message.function_call {
            Some(ref call) => call.clone(),
            None => return Ok(text_or_fallback(message.content)),
        };

        info!(function = %call.name, "Model selected a function");

        let result = agent.dispatch(&call).await;
        let payload = serde_json::to_string(&result).map_err(|e| {
            AssistantError::ProcessingFailed(format!("Failed to encode function result: {}", e))
        })?;

        messages.push(ChatMessage::from(message));
        messages.push(ChatMessage::function(call.name, payload));

        let second = self.api.complete(self.request(messages, false)).await?;

        Ok(text_or_fallback(
            second.first_message().and_then(|m| m.content.clone()),
        ))
    }

    fn request(&self, messages: Vec<ChatMessage>, with_functions: bool) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            functions: with_functions.then(task_functions),
            function_call: with_functions.then(|| "auto".to_string()),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

fn text_or_fallback(content: Option<String>) -> String {
    match content {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("No content in response, using fallback reply");
            FALLBACK_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::{Choice, FunctionCall};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use task_client::{ClientError, TaskBackend, TaskFilter};
    use task_core::{CompletionStatus, Task, TaskCreate, TaskPriority, TaskUpdate};

    /// ChatApi returning scripted responses and recording requests.
    struct ScriptedApi {
        responses: Mutex<Vec<ChatCompletionResponse>>,
        requests: Mutex<Vec<ChatCompletionRequest>>,
    }

    impl ScriptedApi {
        fn new(mut responses: Vec<ChatCompletionResponse>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ChatCompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatApi for ScriptedApi {
        async fn complete(
            &self,
            request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, AssistantError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| AssistantError::ProcessingFailed("script exhausted".to_string()))
        }
    }

    /// Backend recording creates; other operations are unused here.
    #[derive(Default)]
    struct RecordingBackend {
        created: Mutex<Vec<TaskCreate>>,
    }

    #[async_trait]
    impl TaskBackend for RecordingBackend {
        async fn list_tasks(
            &self,
            _user_id: &str,
            _filter: &TaskFilter,
        ) -> Result<Vec<Task>, ClientError> {
            Ok(Vec::new())
        }

        async fn create_task(
            &self,
            user_id: &str,
            payload: &TaskCreate,
        ) -> Result<Task, ClientError> {
            self.created.lock().unwrap().push(payload.clone());
            let now = "2026-08-30T12:00:00Z".parse().unwrap();
            Ok(Task {
                id: "t-1".to_string(),
                user_id: user_id.to_string(),
                title: payload.title.clone(),
                description: None,
                completed: false,
                priority: TaskPriority::Medium,
                tags: None,
                due_date: None,
                notification_time_before: None,
                completed_at: None,
                created_at: now,
                updated_at: now,
            })
        }

        async fn get_task(&self, _user_id: &str, _task_id: &str) -> Result<Task, ClientError> {
            Err(ClientError::MissingToken)
        }

        async fn update_task(
            &self,
            _user_id: &str,
            _task_id: &str,
            _payload: &TaskUpdate,
        ) -> Result<Task, ClientError> {
            Err(ClientError::MissingToken)
        }

        async fn delete_task(&self, _user_id: &str, _task_id: &str) -> Result<(), ClientError> {
            Err(ClientError::MissingToken)
        }

        async fn complete_task(
            &self,
            _user_id: &str,
            _task_id: &str,
            completed: bool,
        ) -> Result<CompletionStatus, ClientError> {
            Ok(CompletionStatus { completed })
        }
    }

    fn text_response(content: &str) -> ChatCompletionResponse {
        response_with(ResponseMessage {
            role: "assistant".to_string(),
            content: Some(content.to_string()),
            function_call: None,
        })
    }

    fn function_response(name: &str, arguments: &str) -> ChatCompletionResponse {
        response_with(ResponseMessage {
            role: "assistant".to_string(),
            content: None,
            function_call: Some(FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            }),
        })
    }

    fn response_with(message: ResponseMessage) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "cmpl-test".to_string(),
            model: "gpt-4o".to_string(),
            choices: vec![Choice {
                index: 0,
                message,
                finish_reason: None,
            }],
            usage: None,
        }
    }

    fn assistant_with(api: Arc<ScriptedApi>) -> TaskAssistant {
        let config = AssistantConfig::builder().api_key("test").build();
        TaskAssistant::with_api(api, config)
    }

    fn agent() -> (TaskAgent, Arc<RecordingBackend>) {
        let backend = Arc::new(RecordingBackend::default());
        (TaskAgent::new(backend.clone(), "u-1"), backend)
    }

    #[tokio::test]
    async fn test_plain_text_reply_passes_through() {
        let api = ScriptedApi::new(vec![text_response("Hello! How can I help?")]);
        let assistant = assistant_with(api.clone());
        let (agent, _) = agent();

        let reply = assistant
            .respond(vec![ChatMessage::user("hi")], &agent)
            .await
            .unwrap();

        assert_eq!(reply, "Hello! How can I help?");

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].functions.as_ref().unwrap().len(), 5);
        assert_eq!(requests[0].function_call.as_deref(), Some("auto"));
    }

    #[tokio::test]
    async fn test_add_task_two_call_flow() {
        let api = ScriptedApi::new(vec![
            function_response("add_task", r#"{"title": "buy milk"}"#),
            text_response("Done! I've added \"buy milk\" to your list."),
        ]);
        let assistant = assistant_with(api.clone());
        let (agent, backend) = agent();

        let reply = assistant
            .respond(
                vec![ChatMessage::user("Add a task to buy milk")],
                &agent,
            )
            .await
            .unwrap();

        assert!(!reply.is_empty());
        assert!(reply.contains("buy milk"));

        // The function actually hit the backend with the right title.
        let created = backend.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "buy milk");

        // Second request carries the function-call turn plus the function
        // result, and declares no functions.
        let requests = api.requests();
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        assert!(second.functions.is_none());
        assert_eq!(second.messages.len(), 3);
        assert_eq!(second.messages[1].role, "assistant");
        assert!(second.messages[1].function_call.is_some());
        assert_eq!(second.messages[2].role, "function");
        assert_eq!(second.messages[2].name.as_deref(), Some("add_task"));
        assert!(second.messages[2]
            .content
            .as_ref()
            .unwrap()
            .contains("\"success\":true"));
    }

    #[tokio::test]
    async fn test_failed_function_still_produces_reply() {
        // delete_task fails at the backend (RecordingBackend errors on
        // delete); the failure is packaged, not raised.
        let api = ScriptedApi::new(vec![
            function_response("delete_task", r#"{"task_id": "t-1"}"#),
            text_response("I couldn't delete that task, sorry."),
        ]);
        let assistant = assistant_with(api.clone());
        let (agent, _) = agent();

        let reply = assistant
            .respond(vec![ChatMessage::user("delete task t-1")], &agent)
            .await
            .unwrap();

        assert_eq!(reply, "I couldn't delete that task, sorry.");
        let second = &api.requests()[1];
        assert!(second.messages[2]
            .content
            .as_ref()
            .unwrap()
            .contains("\"success\":false"));
    }

    #[tokio::test]
    async fn test_null_content_falls_back() {
        let api = ScriptedApi::new(vec![response_with(ResponseMessage {
            role: "assistant".to_string(),
            content: None,
            function_call: None,
        })]);
        let assistant = assistant_with(api);
        let (agent, _) = agent();

        let reply = assistant
            .respond(vec![ChatMessage::user("???")], &agent)
            .await
            .unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_system_prompt_prepended_once() {
        let api = ScriptedApi::new(vec![text_response("ok")]);
        let config = AssistantConfig::builder()
            .api_key("test")
            .system_prompt("You manage todo lists.")
            .build();
        let assistant = TaskAssistant::with_api(api.clone(), config);
        let (agent, _) = agent();

        assistant
            .respond(vec![ChatMessage::user("hi")], &agent)
            .await
            .unwrap();

        let first = &api.requests()[0];
        assert_eq!(first.messages[0].role, "system");
        assert_eq!(first.messages[1].role, "user");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let api = ScriptedApi::new(vec![]);
        let assistant = assistant_with(api);
        let (agent, _) = agent();

        let err = assistant
            .respond(vec![ChatMessage::user("hi")], &agent)
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::ProcessingFailed(_)));
    }
}
