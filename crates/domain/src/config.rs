use serde::{Deserialize, Serialize};

use crate::chat::Provider;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Server
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "d_8791")]
    pub port: u16,
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8791,
            host: "127.0.0.1".into(),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed for CORS. Defaults to the local editor dev server.
    #[serde(default = "d_cors_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: d_cors_origins(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM backends
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Upper bound on a single backend call. A call that exceeds this is
    /// treated like any other backend failure, so it is fallback-eligible.
    #[serde(default = "d_30000u")]
    pub default_timeout_ms: u64,
    #[serde(default = "d_anthropic_endpoint")]
    pub anthropic: EndpointConfig,
    #[serde(default = "d_groq_endpoint")]
    pub groq: EndpointConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 30_000,
            anthropic: d_anthropic_endpoint(),
            groq: d_groq_endpoint(),
        }
    }
}

impl LlmConfig {
    /// The endpoint block for a backend.
    pub fn endpoint(&self, provider: Provider) -> &EndpointConfig {
        match provider {
            Provider::Anthropic => &self.anthropic,
            Provider::Groq => &self.groq,
        }
    }
}

/// Where one backend lives and which environment variable holds its key.
///
/// The key itself is never stored in config; it is read from `key_env` the
/// first time a client for the backend is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    pub key_env: String,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_8791() -> u16 {
    8791
}
fn d_host() -> String {
    "127.0.0.1".into()
}
fn d_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".into(),
        "http://127.0.0.1:3000".into(),
    ]
}
fn d_30000u() -> u64 {
    30_000
}
fn d_anthropic_endpoint() -> EndpointConfig {
    EndpointConfig {
        base_url: "https://api.anthropic.com".into(),
        key_env: "ANTHROPIC_API_KEY".into(),
    }
}
fn d_groq_endpoint() -> EndpointConfig {
    EndpointConfig {
        base_url: "https://api.groq.com/openai/v1".into(),
        key_env: "GROQ_API_KEY".into(),
    }
}
