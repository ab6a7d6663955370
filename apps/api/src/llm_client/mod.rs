/// LLM Client — the single point of entry for generation-service calls.
///
/// The rest of the crate only sees the `Generator` trait; `LlmClient` is the
/// production implementation backed by the Mistral chat-completions API.
/// One request per call: no retries, no streaming, no conversation state.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The generation capability: resume text in, raw model reply out.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, resume_text: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Mistral-backed `Generator`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.llm_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.mistral_api_key.clone(),
            model: config.mistral_model.clone(),
            endpoint: format!(
                "{}{}",
                config.mistral_base_url.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes one call to the chat-completions API and returns the parsed response.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn generate(&self, resume_text: &str) -> Result<String, LlmError> {
        let prompt = prompts::QUESTIONS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let response = self.call(&prompt, prompts::QUESTIONS_SYSTEM).await?;

        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `message` out of a JSON error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body)
}
