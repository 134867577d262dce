//! AI consultation over an OpenAI-compatible endpoint.
//!
//! [`HostAdvisor`] speaks the chat completion format, which covers OpenAI
//! itself and the many providers that mirror it. One consultation is one
//! request; no conversation state is kept.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use cortado_sdk::{Advisor, AiResponse, SdkError};

use crate::config::AdvisorConfig;

/// The production [`Advisor`] binding.
pub struct HostAdvisor {
    config: AdvisorConfig,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl HostAdvisor {
    /// Create an advisor from configuration.
    ///
    /// The API key will be resolved from the environment variable specified
    /// in `config.api_key_env` at request time.
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: None,
        }
    }

    /// Create an advisor with an explicit API key.
    pub fn with_api_key(config: AdvisorConfig, api_key: String) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: Some(api_key),
        }
    }

    /// Returns the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Resolve the API key: explicit key > environment variable.
    fn resolve_api_key(&self) -> cortado_sdk::Result<String> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.config.api_key_env).map_err(|_| {
            SdkError::Advisor(format!("set {} env var", self.config.api_key_env))
        })
    }
}

// Minimal chat-completion wire format.

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageBody,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u32,
}

/// Build the message list: optional context rides along as a system
/// message rendered to JSON.
fn build_messages(prompt: &str, context: Option<&Value>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(ctx) = context {
        messages.push(ChatMessage {
            role: "system",
            content: format!("Context:\n{ctx}"),
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt.to_string(),
    });
    messages
}

/// Fold a chat response into the capability shape: first choice is the
/// content, remaining choices become suggestions.
fn into_ai_response(response: ChatResponse) -> cortado_sdk::Result<AiResponse> {
    let tokens_used = response.usage.map(|u| u.total_tokens).unwrap_or(0);
    let mut contents = response
        .choices
        .into_iter()
        .filter_map(|c| c.message.content);

    let content = contents
        .next()
        .ok_or_else(|| SdkError::Advisor("response carried no choices".into()))?;

    Ok(AiResponse {
        content,
        suggestions: contents.collect(),
        tokens_used,
    })
}

#[async_trait]
impl Advisor for HostAdvisor {
    async fn consult(
        &self,
        prompt: &str,
        context: Option<&Value>,
    ) -> cortado_sdk::Result<AiResponse> {
        let api_key = self.resolve_api_key()?;
        let url = self.completions_url();

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            has_context = context.is_some(),
            "consulting advisor"
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: build_messages(prompt, context),
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Advisor(format!("request failed: {e}")))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(SdkError::Advisor(format!("authentication failed: {body}")));
            }
            return Err(SdkError::Advisor(format!("HTTP {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Advisor(format!("failed to parse response: {e}")))?;

        let reply = into_ai_response(parsed)?;
        debug!(tokens_used = reply.tokens_used, "advisor reply received");
        Ok(reply)
    }
}

impl std::fmt::Debug for HostAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostAdvisor")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}
