use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage,
        ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use crate::error::TravelError;
use crate::llm::LlmCaller;

pub struct OpenAiCaller {
    client:      Client<OpenAIConfig>,
    model:       String,
    temperature: f32,
}

impl OpenAiCaller {
    /// Standard OpenAI client with an explicit key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model:  model.into(),
            temperature,
        }
    }

    /// Custom base URL, for Groq, Together, Ollama, Fireworks, etc.
    /// api_base example: "https://api.groq.com/openai/v1"
    pub fn with_base_url(
        api_base:    impl Into<String>,
        api_key:     impl Into<String>,
        model:       impl Into<String>,
        temperature: f32,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model:  model.into(),
            temperature,
        }
    }
}

#[async_trait]
impl LlmCaller for OpenAiCaller {
    async fn complete(&self, prompt: &str) -> Result<String, TravelError> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| TravelError::Llm(format!("Failed to build message: {}", e)))?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .temperature(self.temperature)
            .messages(vec![message])
            .build()
            .map_err(|e| TravelError::Llm(format!("Failed to build request: {}", e)))?;

        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "openai chat completion");

        let response = self.client.chat()
            .create(request)
            .await
            .map_err(|e| TravelError::Llm(format!("OpenAI API error: {}", e)))?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens     = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "openai usage"
            );
        }

        let choice = response.choices.into_iter().next()
            .ok_or_else(|| TravelError::Llm("Empty response from OpenAI".to_string()))?;

        choice.message.content
            .ok_or_else(|| TravelError::Llm("No content in OpenAI response".to_string()))
    }
}
