//! Model catalog and liveness endpoints.
//!
//! - `GET /v1/models` — the static (backend, tier) → model table
//! - `GET /v1/health` — liveness probe

use axum::response::{IntoResponse, Json};

use quill_domain::chat::{model_for, Provider, Speed};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/models
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn list_models() -> impl IntoResponse {
    let providers: Vec<serde_json::Value> = [Provider::Anthropic, Provider::Groq]
        .into_iter()
        .map(|p| {
            serde_json::json!({
                "provider": p,
                "models": {
                    "default": model_for(p, Speed::Default),
                    "fast": model_for(p, Speed::Fast),
                },
                "fallback": p.fallback(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "primary": Provider::PRIMARY,
        "providers": providers,
    }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/health
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
