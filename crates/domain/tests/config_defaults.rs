use quill_domain::chat::Provider;
use quill_domain::config::Config;

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8791);
}

#[test]
fn explicit_zero_host_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 8080
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
}

#[test]
fn default_cors_allows_only_localhost() {
    let config = Config::default();
    assert!(!config.server.cors.allowed_origins.is_empty());
    for origin in &config.server.cors.allowed_origins {
        assert!(
            origin.starts_with("http://localhost") || origin.starts_with("http://127.0.0.1"),
            "unexpected default origin: {origin}"
        );
    }
}

#[test]
fn cors_config_parses_custom_origins() {
    let toml_str = r#"
[server.cors]
allowed_origins = ["https://myapp.com", "http://localhost:3000"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.cors.allowed_origins.len(), 2);
    assert!(config
        .server
        .cors
        .allowed_origins
        .contains(&"https://myapp.com".to_string()));
}

#[test]
fn default_credential_env_vars() {
    let config = Config::default();
    assert_eq!(config.llm.anthropic.key_env, "ANTHROPIC_API_KEY");
    assert_eq!(config.llm.groq.key_env, "GROQ_API_KEY");
}

#[test]
fn default_base_urls_point_at_hosted_apis() {
    let config = Config::default();
    assert_eq!(config.llm.anthropic.base_url, "https://api.anthropic.com");
    assert_eq!(config.llm.groq.base_url, "https://api.groq.com/openai/v1");
}

#[test]
fn endpoint_selects_per_provider_block() {
    let config = Config::default();
    assert_eq!(
        config.llm.endpoint(Provider::Anthropic).key_env,
        "ANTHROPIC_API_KEY"
    );
    assert_eq!(config.llm.endpoint(Provider::Groq).key_env, "GROQ_API_KEY");
}

#[test]
fn timeout_override_parses() {
    let toml_str = r#"
[llm]
default_timeout_ms = 5000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.llm.default_timeout_ms, 5_000);
    // Endpoint blocks keep their defaults when omitted.
    assert_eq!(config.llm.groq.key_env, "GROQ_API_KEY");
}

#[test]
fn endpoint_block_override_parses() {
    let toml_str = r#"
[llm.anthropic]
base_url = "http://localhost:9999"
key_env = "TEST_ANTHROPIC_KEY"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.llm.anthropic.base_url, "http://localhost:9999");
    assert_eq!(config.llm.anthropic.key_env, "TEST_ANTHROPIC_KEY");
}
