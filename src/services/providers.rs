// Text Generation Provider
// Anthropic Messages API client behind the `TextGenerator` seam

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use super::config_store::{resolve_api_key, AppConfig, GenerationConfig};

const ANTHROPIC_DEFAULT_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Missing content in response")]
    MissingContent,
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("API key not configured")]
    MissingApiKey,
}

/// One prompt plus its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: Option<f64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, params: &GenerationConfig) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    pub content: String,
    pub latency_ms: i64,
}

/// Anything that turns a prompt into text.
///
/// Handlers are generic over this so tests can substitute a canned generator.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<ChatResult, ProviderError>> + Send;
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessagesResponse {
    content: Option<Vec<MessagesContent>>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessagesContent {
    text: Option<String>,
}

pub struct ProviderClient {
    client: Client,
    url: String,
    model: String,
    api_version: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(
        url: Option<String>,
        model: impl Into<String>,
        api_version: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        proxy_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(proxy_url) = proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.unwrap_or_else(|| ANTHROPIC_DEFAULT_URL.to_string()),
            model: model.into(),
            api_version: api_version.into(),
            api_key: api_key.into(),
        })
    }

    /// Build the process-wide client from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let api_key = resolve_api_key(config).ok_or(ProviderError::MissingApiKey)?;
        Self::new(
            config.provider.base_url.clone(),
            config.provider.model.clone(),
            config.provider.api_version.clone(),
            api_key,
            Duration::from_secs(config.provider.timeout_secs),
            config.proxy.as_ref().and_then(|p| p.active_url()),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: &GenerationRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        }
    }

    async fn call_messages_api(&self, request: &GenerationRequest) -> Result<ChatResult, ProviderError> {
        let body = self.build_body(request);
        let start = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let data: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::JsonError(e.to_string()))?;

        let content = first_text(data).ok_or(ProviderError::MissingContent)?;
        debug!(latency_ms, model = %self.model, "provider.reply");

        Ok(ChatResult {
            content,
            latency_ms,
        })
    }
}

fn first_text(data: MessagesResponse) -> Option<String> {
    data.content
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.text)
        .map(|t| t.trim().to_string())
}

impl TextGenerator for ProviderClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<ChatResult, ProviderError> {
        self.call_messages_api(request).await
    }
}
