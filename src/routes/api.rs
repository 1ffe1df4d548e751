use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::handlers::conversation;
use crate::state::AppState;
use std::sync::Arc;

/// Path of the relay route
pub const CONVERSATION_PATH: &str = "/elevenlabs-conversation";

/// Create the API router
///
/// CORS headers are applied on top of this router by [`super::create_app`].
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            CONVERSATION_PATH,
            post(conversation::elevenlabs_conversation).options(conversation::preflight),
        )
        .layer(TraceLayer::new_for_http())
}
