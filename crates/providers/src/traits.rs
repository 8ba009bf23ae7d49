use quill_domain::chat::{ChatMessage, Provider};
use quill_domain::error::Result;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Resolved request options
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Fully-resolved options handed to an adapter.
///
/// Unlike [`quill_domain::chat::ChatOptions`], nothing here is optional
/// except the system prompt: the dispatcher has already applied defaults
/// and looked the model up in the model table.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub system_prompt: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Core provider trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Trait that every LLM adapter must implement.
///
/// Implementations translate the provider-agnostic message sequence into
/// one backend's wire format, issue the call, and pull a single text
/// result back out. An empty but successful completion is `Ok("")`, not
/// an error. Adapters never retry internally; every transport or
/// backend-reported failure propagates so the dispatcher alone decides
/// whether to fall back.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Send the conversation and wait for the full text response.
    async fn invoke(&self, messages: &[ChatMessage], req: &ResolvedOptions) -> Result<String>;

    /// Which backend this adapter talks to.
    fn provider(&self) -> Provider;
}
