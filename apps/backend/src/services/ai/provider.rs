//! OpenAI chat-completions compatible provider

use async_trait::async_trait;
use practice_core::{parse_validated, Validate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::AiError;

const MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Supported provider families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Qwen,
    DeepSeek,
    Glm,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "qwen" => Some(ProviderKind::Qwen),
            "deepseek" => Some(ProviderKind::DeepSeek),
            "glm" => Some(ProviderKind::Glm),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Qwen => "qwen",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Glm => "glm",
        }
    }

    /// Base URL used when the config has none; `None` for unsupported kinds
    pub fn default_base_url(self) -> Option<&'static str> {
        match self {
            ProviderKind::Qwen => Some("https://dashscope.aliyuncs.com/compatible-mode/v1"),
            ProviderKind::DeepSeek => Some("https://api.deepseek.com/v1"),
            ProviderKind::Glm => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Per-call request options
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub json_mode: bool,
}

impl ChatOptions {
    pub fn json() -> Self {
        Self { json_mode: true }
    }
}

/// A chat completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the conversation and return the assistant's text
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String, AiError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

/// Send a JSON-mode chat and parse the reply into a validated schema
pub async fn structured_chat<T>(
    provider: &dyn ChatProvider,
    messages: &[ChatMessage],
) -> Result<T, AiError>
where
    T: DeserializeOwned + Validate,
{
    let raw = provider.chat(messages, &ChatOptions::json()).await?;
    parse_validated(&raw).map_err(|e| {
        tracing::warn!(model = provider.model(), error = %e, "structured reply rejected");
        AiError::from(e)
    })
}

/// Resolved connection settings for one provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f64,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Provider speaking the OpenAI `/chat/completions` protocol
pub struct OpenAiCompatibleProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl OpenAiCompatibleProvider {
    /// Build a provider; fails for provider kinds without an
    /// OpenAI-compatible endpoint.
    pub fn new(client: Client, config: ProviderConfig) -> Result<Self, AiError> {
        let default_base_url = config
            .kind
            .default_base_url()
            .ok_or_else(|| AiError::UnsupportedProvider(config.kind.as_str().to_string()))?;

        let base_url = config
            .base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| default_base_url.to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model,
            api_key: config.api_key,
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: MAX_TOKENS,
            response_format: options
                .json_mode
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "sending chat request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = status.as_u16(), "chat request rejected");
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
