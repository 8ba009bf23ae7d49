/// Shared error type used across all quill crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("missing credential for provider {provider}: set {env_var}")]
    MissingCredential { provider: String, env_var: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came out of a backend call (transport failure,
    /// backend-reported error, or timeout). Only these are eligible for
    /// fallback to the secondary backend; caller bugs and configuration
    /// errors are not masked by a retry.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Error::Provider { .. } | Error::Http(_) | Error::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failures_are_fallback_eligible() {
        assert!(Error::Http("connection reset".into()).is_provider_failure());
        assert!(Error::Timeout("30000ms elapsed".into()).is_provider_failure());
        assert!(Error::Provider {
            provider: "anthropic".into(),
            message: "HTTP 529 - overloaded".into(),
        }
        .is_provider_failure());
    }

    #[test]
    fn caller_and_config_errors_are_not() {
        assert!(!Error::InvalidInput("messages must not be empty".into()).is_provider_failure());
        assert!(!Error::MissingCredential {
            provider: "groq".into(),
            env_var: "GROQ_API_KEY".into(),
        }
        .is_provider_failure());
        assert!(!Error::Config("bad toml".into()).is_provider_failure());
    }

    #[test]
    fn missing_credential_message_names_env_var() {
        let err = Error::MissingCredential {
            provider: "anthropic".into(),
            env_var: "ANTHROPIC_API_KEY".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("anthropic"));
        assert!(msg.contains("ANTHROPIC_API_KEY"));
    }
}
