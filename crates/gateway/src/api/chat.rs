//! Chat API endpoint — the HTTP face of the dispatcher.
//!
//! - `POST /v1/chat` — non-streaming: `{ messages, options? }` in,
//!   `{ content }` out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use quill_domain::chat::{ChatMessage, ChatOptions};
use quill_domain::error::Error;

use crate::api::api_error;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request shape
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    /// The conversation, oldest first. Required and non-empty.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Dispatch options; defaults apply when omitted.
    #[serde(default)]
    pub options: Option<ChatOptions>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/chat
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequestBody>,
) -> Response {
    if body.messages.is_empty() {
        return api_error(
            StatusCode::BAD_REQUEST,
            "messages array is required and must not be empty",
        );
    }

    let request_id = uuid::Uuid::new_v4();
    let options = body.options.unwrap_or_default();

    tracing::debug!(
        request_id = %request_id,
        messages = body.messages.len(),
        "chat request"
    );

    match state.dispatcher.chat(&body.messages, &options).await {
        Ok(content) => Json(serde_json::json!({ "content": content })).into_response(),
        // Caller errors carry their specific message out.
        Err(e @ Error::InvalidInput(_)) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        // Everything else is logged in full and reported generically.
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "chat request failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "chat request failed")
        }
    }
}
