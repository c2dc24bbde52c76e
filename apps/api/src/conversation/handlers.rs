//! Axum route handlers for the Conversation API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::conversation::coach::{ConversationView, IgnoreReason, Submission};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IgnoreReason>,
    pub phase: u8,
    pub question_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct RestartRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct RestartResponse {
    pub restarted: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/conversation
///
/// Full snapshot: stage, progress, responses and the rendered transcript.
pub async fn handle_get_conversation(State(state): State<AppState>) -> Json<ConversationView> {
    Json(state.coach.snapshot().await)
}

/// POST /api/v1/conversation/messages
///
/// 202 when the answer is recorded and a reply is on its way. Empty text, or text
/// sent after the conversation completed, is a 200 no-op. 409 while the previous
/// reply is still playing.
pub async fn handle_post_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    match state.coach.submit(&request.text).await? {
        Submission::Accepted {
            phase,
            question_index,
        } => Ok((
            StatusCode::ACCEPTED,
            Json(MessageResponse {
                accepted: true,
                reason: None,
                phase,
                question_index,
            }),
        )),
        Submission::Ignored(reason) => {
            let view = state.coach.snapshot().await;
            Ok((
                StatusCode::OK,
                Json(MessageResponse {
                    accepted: false,
                    reason: Some(reason),
                    phase: view.phase,
                    question_index: view.question_index,
                }),
            ))
        }
    }
}

/// POST /api/v1/conversation/restart
///
/// Clears all progress when `confirm` is true; otherwise leaves everything as is.
pub async fn handle_restart(
    State(state): State<AppState>,
    Json(request): Json<RestartRequest>,
) -> Json<RestartResponse> {
    let restarted = state.coach.restart(request.confirm).await;
    Json(RestartResponse { restarted })
}
