use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::errors::GameGenResult;
use crate::implementations::config::{ GeneratorConfig, Provider };
use crate::traits::chat_model::{ ChatModel, StructuredPrompt };

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {status} - {message}")]
    Http {
        status: u16,
        message: String,
    },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Client setup failed: {0}")]
    Setup(String),
}

/// OpenAI API request and response types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatResponseChoice>,
}

/// Anthropic messages API types
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

/// Chat model reached over HTTP, speaking either the OpenAI or Anthropic wire format
#[derive(Clone)]
pub struct HttpChatModel {
    http_client: reqwest::Client,
    provider: Provider,
    api_key: String,
    endpoint: String,
    model: String,
    organization_id: Option<String>,
    temperature: f32,
    max_tokens: usize,
}

impl HttpChatModel {
    /// Build a client from the configuration, resolving provider and API key
    pub fn from_config(config: &GeneratorConfig) -> GameGenResult<Self> {
        let (provider, api_key) = config.get_api_key()?;
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(120));

        let http_client = reqwest::Client
            ::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Setup(e.to_string()))?;

        Ok(Self {
            http_client,
            provider,
            api_key,
            endpoint: config.endpoint_for(provider),
            model: config.model_for(provider),
            organization_id: config.llm_api.organization_id.clone(),
            temperature: config.temperature.unwrap_or(0.2),
            max_tokens: config.max_tokens.unwrap_or(provider.default_max_tokens()),
        })
    }

    /// Build a client against an explicit endpoint
    pub fn new(
        provider: Provider,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>
    ) -> Result<Self, LlmError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::Setup(e.to_string()))?;

        Ok(Self {
            http_client,
            provider,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            organization_id: None,
            temperature: 0.2,
            max_tokens: provider.default_max_tokens(),
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, LlmError> {
        let response = request.send().await.map_err(|e| {
            let error_msg = format!("Network error when calling {:?} API: {}", self.provider, e);
            warn!("{}", error_msg);
            if e.is_timeout() {
                warn!("Request timed out");
            }
            if e.is_connect() {
                warn!("Connection error - check network connectivity");
            }
            LlmError::Network(error_msg)
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, message);
            return Err(LlmError::Http { status, message });
        }

        let text = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            LlmError::Parse(e.to_string())
        })?;

        debug!("Response length: {} characters", text.len());
        Ok(text)
    }

    async fn complete_openai(&self, prompt: &StructuredPrompt) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(prompt.system.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(prompt.user.clone()),
                }
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &prompt.schema_name,
                    schema: &prompt.schema,
                    strict: false,
                },
            },
        };

        let mut builder = self.http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request);
        if let Some(org) = &self.organization_id {
            builder = builder.header("OpenAI-Organization", org);
        }

        let text = self.send(builder).await?;
        let response: ChatResponse = serde_json
            ::from_str(&text)
            .map_err(|e| LlmError::Parse(format!("Invalid JSON response: {}", e)))?;

        response.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn complete_anthropic(&self, prompt: &StructuredPrompt) -> Result<String, LlmError> {
        // No native schema parameter here; the schema already lives in the system prompt
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: &prompt.system,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.user.clone()),
            }],
        };

        let builder = self.http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request);

        let text = self.send(builder).await?;
        let response: AnthropicResponse = serde_json
            ::from_str(&text)
            .map_err(|e| LlmError::Parse(format!("Invalid JSON response: {}", e)))?;

        let content: String = response.content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(content)
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    async fn complete(&self, prompt: &StructuredPrompt) -> Result<String, LlmError> {
        info!("Making LLM API request to {:?} ({})", self.provider, self.model);
        debug!("API endpoint: {}", self.endpoint);
        debug!("Schema: {}", prompt.schema_name);
        debug!("Prompt length: {} characters", prompt.system.len() + prompt.user.len());

        let content = match self.provider {
            Provider::OpenAI => self.complete_openai(prompt).await?,
            Provider::Anthropic => self.complete_anthropic(prompt).await?,
        };

        info!("API call completed successfully");
        debug!("Content length: {} characters", content.len());
        Ok(content)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
