use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Conversation model
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A message in the conversation (provider-agnostic).
///
/// Ordering is significant; a dispatch call never mutates the sequence it
/// is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

// ── Convenience constructors ───────────────────────────────────────

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, content: text.into() }
    }
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into() }
    }
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: text.into() }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Providers and model tiers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An external LLM backend with its own wire format and model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    Groq,
}

impl Provider {
    /// The backend tried first when the caller does not pick one.
    pub const PRIMARY: Provider = Provider::Anthropic;

    /// The backend a failed request is retried against, if any.
    ///
    /// Fallback is single-hop: the secondary backend has no fallback
    /// target of its own.
    pub fn fallback(self) -> Option<Provider> {
        match self {
            Provider::Anthropic => Some(Provider::Groq),
            Provider::Groq => None,
        }
    }

    /// Stable identifier used in logs and error messages.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Groq => "groq",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Quality/latency trade-off selecting a concrete model per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Default,
    Fast,
}

/// Resolve the concrete model name for a (backend, tier) pair.
///
/// The match is total over both enums, so every pair a caller can name
/// resolves to a model.
pub fn model_for(provider: Provider, speed: Speed) -> &'static str {
    match (provider, speed) {
        (Provider::Anthropic, Speed::Default) => "claude-3-5-sonnet-20241022",
        (Provider::Anthropic, Speed::Fast) => "claude-3-5-haiku-20241022",
        (Provider::Groq, Speed::Default) => "llama-3.3-70b-versatile",
        (Provider::Groq, Speed::Fast) => "llama-3.1-8b-instant",
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request options
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Caller-supplied knobs for one chat dispatch. Every field is optional;
/// the dispatcher fills in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOptions {
    /// Preferred backend. Defaults to [`Provider::PRIMARY`].
    #[serde(default)]
    pub provider: Option<Provider>,
    /// Model tier. Defaults to [`Speed::Default`].
    #[serde(default)]
    pub speed: Option<Speed>,
    /// Cap on generated tokens. Defaults to 4096.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature. Defaults to 0.7.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Overrides any system-role message in the sequence.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
