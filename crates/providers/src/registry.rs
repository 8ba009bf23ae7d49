//! Provider client registry.
//!
//! Lazily constructs and caches one client per backend. Construction
//! happens on first use — that is when the backend's credential is read
//! from the environment — and the resulting handle is reused for the rest
//! of the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use quill_domain::chat::Provider;
use quill_domain::config::LlmConfig;
use quill_domain::error::Result;

use crate::anthropic::AnthropicProvider;
use crate::openai_compat::OpenAiCompatProvider;
use crate::traits::LlmProvider;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ProviderRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds lazily-constructed LLM clients, at most one per backend.
///
/// Concurrent first calls for the same backend may each construct a
/// client; the insert keeps whichever lands first and the extras are
/// dropped. Credentials are stateless, so the transient duplicates are
/// harmless and every caller still observes a usable handle.
pub struct ProviderRegistry {
    config: LlmConfig,
    clients: RwLock<HashMap<Provider, Arc<dyn LlmProvider>>>,
}

impl ProviderRegistry {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Get the cached client for `provider`, constructing it on first call.
    pub fn get(&self, provider: Provider) -> Result<Arc<dyn LlmProvider>> {
        if let Some(client) = self.clients.read().get(&provider) {
            return Ok(client.clone());
        }

        // Construct outside the write lock; a concurrent caller may do the
        // same, and entry() keeps the first insert.
        let client = self.construct(provider)?;
        tracing::info!(provider = %provider, "constructed LLM client");

        let mut clients = self.clients.write();
        Ok(clients.entry(provider).or_insert(client).clone())
    }

    /// Inject a pre-built client, replacing any cached one.
    ///
    /// Composition roots use this to seed the registry eagerly; tests use
    /// it to install mock backends.
    pub fn insert(&self, client: Arc<dyn LlmProvider>) {
        self.clients.write().insert(client.provider(), client);
    }

    fn construct(&self, provider: Provider) -> Result<Arc<dyn LlmProvider>> {
        let endpoint = self.config.endpoint(provider);
        Ok(match provider {
            Provider::Anthropic => Arc::new(AnthropicProvider::from_config(endpoint)?),
            Provider::Groq => Arc::new(OpenAiCompatProvider::from_config(endpoint)?),
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
