use std::sync::Arc;

use quill_domain::config::Config;
use quill_providers::ChatDispatcher;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Arc<ChatDispatcher>,
}

impl AppState {
    /// Build the state from config: the dispatcher owns a lazily-populated
    /// client registry, so no backend credential is read here.
    pub fn from_config(config: Arc<Config>) -> Self {
        let dispatcher = Arc::new(ChatDispatcher::from_config(&config.llm));
        Self { config, dispatcher }
    }
}
