pub mod api;

use axum::Router;
use std::sync::Arc;

use crate::middleware::with_cors_headers;
use crate::state::AppState;

/// Build the complete application: API routes, state, and CORS headers
pub fn create_app(state: Arc<AppState>) -> Router {
    with_cors_headers(api::create_api_router().with_state(state))
}
