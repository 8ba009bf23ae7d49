//! Chat dispatcher.
//!
//! Resolves caller options against the model table, invokes the chosen
//! backend's adapter, and on failure of the primary backend retries once
//! against the secondary before surfacing an error. Fallback is
//! deliberately single-hop: it masks outages of the preferred backend
//! without building failover chains.

use std::sync::Arc;

use quill_domain::chat::{model_for, ChatMessage, ChatOptions, Provider, Speed};
use quill_domain::config::LlmConfig;
use quill_domain::error::{Error, Result};

use crate::registry::ProviderRegistry;
use crate::traits::{LlmProvider, ResolvedOptions};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Defaults
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f64 = 0.7;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dispatcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Dispatches provider-agnostic conversations to a concrete backend,
/// with single-hop fallback from the primary to the secondary.
pub struct ChatDispatcher {
    registry: ProviderRegistry,
    default_timeout_ms: u64,
}

impl ChatDispatcher {
    /// Build the dispatcher and its registry from the LLM config.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(ProviderRegistry::new(config.clone()), config.default_timeout_ms)
    }

    /// Build from an already-constructed registry (useful for testing).
    pub fn new(registry: ProviderRegistry, default_timeout_ms: u64) -> Self {
        Self {
            registry,
            default_timeout_ms,
        }
    }

    /// Get a reference to the underlying registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    // ── Public dispatch API ────────────────────────────────────────

    /// Send a conversation and return the generated text.
    ///
    /// 1. Rejects an empty sequence before any backend is touched.
    /// 2. Resolves provider, tier, model, and sampling defaults.
    /// 3. Invokes the chosen adapter, bounded by the configured timeout.
    /// 4. When the *primary* backend fails with a backend error, invokes
    ///    the secondary once with the same messages and options; the
    ///    secondary's outcome is final either way.
    ///
    /// Configuration errors ([`Error::MissingCredential`]) and caller
    /// errors never trigger fallback.
    pub async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        if messages.is_empty() {
            return Err(Error::InvalidInput("messages must not be empty".into()));
        }

        let provider = options.provider.unwrap_or(Provider::PRIMARY);
        let speed = options.speed.unwrap_or(Speed::Default);
        let resolved = ResolvedOptions {
            model: model_for(provider, speed).to_string(),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            system_prompt: options.system_prompt.clone(),
        };

        match self.try_invoke(provider, messages, &resolved).await {
            Ok(text) => Ok(text),
            Err(e) => {
                let fallback = match provider.fallback() {
                    Some(fb) if e.is_provider_failure() => fb,
                    _ => return Err(e),
                };

                tracing::warn!(
                    provider = %provider,
                    fallback = %fallback,
                    error = %e,
                    "primary provider failed, falling back"
                );

                let resolved = ResolvedOptions {
                    model: model_for(fallback, speed).to_string(),
                    ..resolved
                };
                self.try_invoke(fallback, messages, &resolved).await
            }
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Invoke one backend's adapter with a timeout wrapper. An elapsed
    /// timer counts as a backend failure, so it is fallback-eligible.
    async fn try_invoke(
        &self,
        provider: Provider,
        messages: &[ChatMessage],
        resolved: &ResolvedOptions,
    ) -> Result<String> {
        let client: Arc<dyn LlmProvider> = self.registry.get(provider)?;

        let timeout = std::time::Duration::from_millis(self.default_timeout_ms);
        match tokio::time::timeout(timeout, client.invoke(messages, resolved)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "provider '{}' timed out after {}ms",
                provider, self.default_timeout_ms
            ))),
        }
    }
}
