//! Gateway to the hosted chat-completion model.
//!
//! The gateway is an explicitly constructed value with a tagged
//! "not configured" variant: availability is part of the constructor
//! contract, not ambient state. When disabled, no network call is ever made.

use crate::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("assistente IA não configurado")]
    NotConfigured,
    #[error("falha na requisição ao provedor: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provedor retornou status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("resposta do provedor sem conteúdo")]
    EmptyReply,
}

/// Hosted-model gateway: either a configured client or a tagged absence.
pub enum Gateway {
    Disabled,
    Openai(OpenAiClient),
}

impl Gateway {
    /// Build from configuration. An absent or empty credential yields
    /// `Disabled` — the caller gets a localized refusal instead of an error.
    pub fn from_config(config: &Config) -> Self {
        match &config.openai_api_key {
            Some(key) if !key.is_empty() => Gateway::Openai(OpenAiClient::new(
                key.clone(),
                config.openai_base_url.clone(),
                config.openai_model.clone(),
            )),
            _ => Gateway::Disabled,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Gateway::Openai(_))
    }

    /// One round-trip constrained to a JSON object reply.
    pub async fn chat_json(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        match self {
            Gateway::Disabled => Err(GatewayError::NotConfigured),
            Gateway::Openai(client) => client.complete(system, user, true, Some(4096)).await,
        }
    }

    /// One free-form round-trip.
    pub async fn chat_text(
        &self,
        system: &str,
        user: &str,
        max_tokens: Option<u32>,
    ) -> Result<String, GatewayError> {
        match self {
            Gateway::Disabled => Err(GatewayError::NotConfigured),
            Gateway::Openai(client) => client.complete(system, user, false, max_tokens).await,
        }
    }
}

/// Minimal chat-completions client over the OpenAI-compatible API.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        json_mode: bool,
        max_tokens: Option<u32>,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
            temperature: 0.7,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let reply: ChatCompletionReply = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GatewayError::EmptyReply)
    }
}
