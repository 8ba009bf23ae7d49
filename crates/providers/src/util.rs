//! Shared utility functions for provider adapters.

use quill_domain::chat::Provider;
use quill_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`]. Both are fallback-eligible.
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Read a backend's API key from the environment variable named in config.
///
/// An unset or empty variable is a configuration error, surfaced on first
/// client construction rather than at process start.
pub(crate) fn resolve_api_key(provider: Provider, key_env: &str) -> Result<String> {
    match std::env::var(key_env) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(Error::MissingCredential {
            provider: provider.id().into(),
            env_var: key_env.into(),
        }),
    }
}
