pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::conversation::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Conversation API
        .route(
            "/api/v1/conversation",
            get(handlers::handle_get_conversation),
        )
        .route(
            "/api/v1/conversation/messages",
            post(handlers::handle_post_message),
        )
        .route(
            "/api/v1/conversation/restart",
            post(handlers::handle_restart),
        )
        .fallback(not_found)
        .with_state(state)
}
