use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use thiserror::Error;

use crate::configuration::GeminiSettings;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Missing GEMINI_API_KEY env var")]
    MissingApiKey,
    #[error("Gemini request failed: {0}")]
    Request(#[from] OpenAIError),
    #[error("No content in Gemini response")]
    EmptyResponse,
}

/// Chat client pointed at Gemini's OpenAI-compatible endpoint.
pub struct GeminiClient {
    client: Client<OpenAIConfig>,
    default_model: Option<String>,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, GeminiError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&settings.api_base);

        Ok(GeminiClient {
            client: Client::with_config(config),
            default_model: settings.model.clone().filter(|m| !m.is_empty()),
        })
    }

    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        requested
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::info!("Gemini response id: {}", response.id);

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GeminiError::EmptyResponse)
    }
}
