use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use pbtracker_core::prompt::{build_context, system_prompt, FinancialContext};

use crate::anthropic::ChatProvider;
use crate::error::RelayError;

pub const SERVICE_NAME: &str = "PBTracker Claude API Server";

/// Shared by every request: the provider client and nothing else. No
/// per-conversation state is held server-side.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ChatProvider>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub financial_data: Option<FinancialContext>,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/claude-chat", post(claude_chat))
        .with_state(state)
}

/// POST /api/claude-chat — validate, assemble the prompt, make exactly one
/// provider round trip, map the outcome.
async fn claude_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, RelayError> {
    let message = req.message.trim();
    let Some(data) = req.financial_data else {
        return Err(RelayError::MissingFields);
    };
    if message.is_empty() {
        return Err(RelayError::MissingFields);
    }

    let context = build_context(&data.summary, &data.budgets, &data.recent_activity);
    let system = system_prompt(&context);

    info!(user = %req.user_id, "forwarding chat request to provider");
    let reply = state.provider.complete(&system, message).await?;
    info!(user = %req.user_id, chars = reply.len(), "provider reply received");

    Ok(Json(ChatResponse {
        response: reply,
        success: true,
    }))
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
    }))
}

/// GET / — human-readable endpoint index
async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("{SERVICE_NAME} is running"),
        "endpoints": {
            "chat": "POST /api/claude-chat",
            "health": "GET /api/health",
        },
    }))
}
