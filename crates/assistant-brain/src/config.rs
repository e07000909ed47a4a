//! Configuration for the assistant.

use std::env;

use crate::AssistantError;

/// Configuration for [`crate::TaskAssistant`].
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Chat-completion API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system prompt prepended to conversations.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl AssistantConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `OPENAI_API_KEY` | API key | (required) |
    /// | `OPENAI_API_URL` | API URL | `https://api.openai.com` |
    /// | `OPENAI_MODEL` | Model name | `gpt-4o` |
    /// | `OPENAI_SYSTEM_PROMPT` | System prompt | (none) |
    /// | `OPENAI_MAX_TOKENS` | Max response tokens | (none) |
    /// | `OPENAI_TEMPERATURE` | Temperature | (none) |
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AssistantError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let system_prompt = env::var("OPENAI_SYSTEM_PROMPT").ok().filter(|s| !s.is_empty());

        let max_tokens = env::var("OPENAI_MAX_TOKENS").ok().and_then(|v| v.parse().ok());

        let temperature = env::var("OPENAI_TEMPERATURE").ok().and_then(|v| v.parse().ok());

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }
}

/// Builder for [`AssistantConfig`].
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AssistantConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4o");
        assert!(config.system_prompt.is_none());
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_builder_all_options() {
        let config = AssistantConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("gpt-4o-mini")
            .system_prompt("You are a task assistant")
            .max_tokens(512)
            .temperature(0.4)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(
            config.system_prompt,
            Some("You are a task assistant".to_string())
        );
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.4));
    }

    // Environment-based scenarios share one test; env vars are
    // process-global and tests run in parallel.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_vars() {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("OPENAI_API_URL");
            std::env::remove_var("OPENAI_MODEL");
            std::env::remove_var("OPENAI_SYSTEM_PROMPT");
            std::env::remove_var("OPENAI_MAX_TOKENS");
            std::env::remove_var("OPENAI_TEMPERATURE");
        }

        // Missing API key errors
        clear_vars();
        let err = AssistantConfig::from_env().unwrap_err();
        match err {
            AssistantError::Configuration(msg) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("unexpected error: {other:?}"),
        }

        // Only the key set: defaults apply
        clear_vars();
        std::env::set_var("OPENAI_API_KEY", "test-key");
        let config = AssistantConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, "gpt-4o");
        assert!(config.max_tokens.is_none());

        // Everything set
        clear_vars();
        std::env::set_var("OPENAI_API_KEY", "full-key");
        std::env::set_var("OPENAI_API_URL", "https://proxy.example.com");
        std::env::set_var("OPENAI_MODEL", "gpt-4.1");
        std::env::set_var("OPENAI_SYSTEM_PROMPT", "Be brief");
        std::env::set_var("OPENAI_MAX_TOKENS", "2048");
        std::env::set_var("OPENAI_TEMPERATURE", "0.2");
        let config = AssistantConfig::from_env().unwrap();
        assert_eq!(config.api_url, "https://proxy.example.com");
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.system_prompt, Some("Be brief".to_string()));
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.2));

        clear_vars();
    }
}
