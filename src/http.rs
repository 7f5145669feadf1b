//! HTTP boundary — the chat endpoint and health probe.
//!
//! `/chat` always answers HTTP 200: internal failures are logged and
//! surfaced to the user as a single generic retry message, never as an
//! error status.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::intake::{IntakeController, prompts};

/// Inbound chat message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Outbound reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Shared state for the chat routes.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<IntakeController>,
}

/// POST /chat
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    match state
        .controller
        .handle_message(&request.session_id, &request.message)
        .await
    {
        Ok(reply) => Json(ChatResponse { reply }),
        Err(e) => {
            tracing::error!(error = %e, session_id = %request.session_id, "Chat processing failed");
            Json(ChatResponse {
                reply: prompts::APOLOGY.to_string(),
            })
        }
    }
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}
