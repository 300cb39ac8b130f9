//! OpenAI-compatible chat-completions gateway
//!
//! Implements the [`LlmGateway`] port against any OpenAI-compatible HTTP
//! API. The base URL and API-key environment variable come from
//! configuration, so self-hosted and proxy endpoints work unchanged.

use async_trait::async_trait;
use examforge_application::{GatewayError, LlmGateway, LlmSession};
use examforge_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Gateway adapter for OpenAI-compatible chat-completions APIs
pub struct OpenAiCompatGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatGateway {
    /// Create a gateway, reading the API key from `api_key_env`.
    ///
    /// Fails fast when the key is missing so the composition root can abort
    /// before any run starts.
    pub fn new(
        base_url: impl Into<String>,
        api_key_env: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let api_key = std::env::var(api_key_env).map_err(|_| {
            GatewayError::SessionError(format!("API key environment variable {api_key_env} not set"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn chat(&self, model: &Model, messages: Vec<ChatMessage>) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(%model, %url, "Sending chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: model.as_str(),
                messages,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "{status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("malformed response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GatewayError::RequestFailed("response had no choices".to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession {
            gateway: self.clone_handles(),
            model: model.clone(),
            system_prompt: None,
        }))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession {
            gateway: self.clone_handles(),
            model: model.clone(),
            system_prompt: Some(system_prompt.to_string()),
        }))
    }
}

impl OpenAiCompatGateway {
    /// Cheap clone of the connection handles for a session
    fn clone_handles(&self) -> OpenAiCompatGateway {
        OpenAiCompatGateway {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

/// One stateless chat session: system prompt plus a single user turn per send
struct OpenAiSession {
    gateway: OpenAiCompatGateway,
    model: Model,
    system_prompt: Option<String>,
}

impl OpenAiSession {
    fn messages_for(&self, content: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        });
        messages
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.gateway
            .chat(&self.model, self.messages_for(content))
            .await
    }
}
