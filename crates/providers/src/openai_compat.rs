//! OpenAI-compatible adapter.
//!
//! Used for Groq, whose chat-completions endpoint follows the OpenAI wire
//! contract: system instructions are ordinary messages, and the result
//! lives in the first choice's message content.

use serde_json::Value;

use quill_domain::chat::{ChatMessage, Provider, Role};
use quill_domain::config::EndpointConfig;
use quill_domain::error::{Error, Result};

use crate::traits::{LlmProvider, ResolvedOptions};
use crate::util::{from_reqwest, resolve_api_key};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An LLM provider adapter for an OpenAI-compatible chat completions API.
#[derive(Debug)]
pub struct OpenAiCompatProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create the adapter from its endpoint config, reading the API key
    /// from the configured environment variable.
    pub fn from_config(cfg: &EndpointConfig) -> Result<Self> {
        let api_key = resolve_api_key(Provider::Groq, &cfg.key_env)?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn authed_post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request serialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the chat completions request body.
///
/// There is no dedicated system field: an explicit system prompt becomes a
/// synthesized leading system message, and the original sequence follows
/// unchanged. A system-role message already present in the sequence is kept
/// as-is, even alongside a prepended system prompt — the duplication
/// mirrors how this endpoint has always been called here.
fn build_chat_body(messages: &[ChatMessage], req: &ResolvedOptions) -> Value {
    let mut api_messages: Vec<Value> = Vec::with_capacity(messages.len() + 1);

    if let Some(ref system) = req.system_prompt {
        api_messages.push(serde_json::json!({
            "role": "system",
            "content": system,
        }));
    }
    for m in messages {
        api_messages.push(serde_json::json!({
            "role": role_to_str(m.role),
            "content": m.content,
        }));
    }

    serde_json::json!({
        "model": req.model,
        "messages": api_messages,
        "max_tokens": req.max_tokens,
        "temperature": req.temperature,
    })
}

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response deserialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Pull the text out of a chat completions response: the first choice's
/// message content. Missing choices or null content are an empty
/// completion, not an error.
fn extract_text(body: &Value) -> String {
    body.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn invoke(&self, messages: &[ChatMessage], req: &ResolvedOptions) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = build_chat_body(messages, req);

        tracing::debug!(provider = %self.provider(), model = %req.model, url = %url, "openai_compat chat request");

        let resp = self
            .authed_post(&url)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.provider().id().into(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value =
            serde_json::from_str(&resp_text).map_err(|e| Error::Provider {
                provider: self.provider().id().into(),
                message: format!("malformed response: {e}"),
            })?;
        Ok(extract_text(&resp_json))
    }

    fn provider(&self) -> Provider {
        Provider::Groq
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
