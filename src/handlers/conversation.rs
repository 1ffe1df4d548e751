//! Signed conversation URL relay handler
//!
//! `POST /elevenlabs-conversation` resolves the server-held ElevenLabs key,
//! reads `{ "action", "agentId" }` from the body, and for `get_signed_url`
//! forwards the request upstream. `OPTIONS` on the same route answers CORS
//! preflight without touching any of that.

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::core::elevenlabs::ConversationClient;
use crate::errors::relay_error::{RelayError, RelayResult};
use crate::state::AppState;

/// Action name for signed URL requests
pub const GET_SIGNED_URL_ACTION: &str = "get_signed_url";

/// Inbound request body.
///
/// `action` is kept loosely typed so that a missing, `null`, or non-string
/// value is an invalid action rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct InboundRequest {
    #[serde(default)]
    pub action: Option<Value>,
    /// Opaque agent identifier, passed through without validation
    #[serde(default, rename = "agentId")]
    pub agent_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetSignedUrl,
    Unknown,
}

impl InboundRequest {
    pub fn action(&self) -> Action {
        match self.action.as_ref().and_then(Value::as_str) {
            Some(GET_SIGNED_URL_ACTION) => Action::GetSignedUrl,
            _ => Action::Unknown,
        }
    }
}

/// CORS preflight. Always succeeds with an empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Relay a signed URL request to ElevenLabs
pub async fn elevenlabs_conversation(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match relay(&state, body).await {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            payload,
        )
            .into_response(),
        Err(e) => {
            match &e {
                RelayError::InvalidAction => debug!("Rejected request with invalid action"),
                _ => error!("Error in elevenlabs-conversation: {}", e),
            }
            e.into_response()
        }
    }
}

async fn relay(state: &AppState, body: Result<Bytes, BytesRejection>) -> RelayResult<Bytes> {
    // Credential first: nothing else happens without it
    let api_key = state.config.elevenlabs_credential.resolve()?;

    let body = body.map_err(|rejection| RelayError::Unexpected(rejection.body_text()))?;
    let request: InboundRequest = serde_json::from_slice(&body)?;

    match request.action() {
        Action::GetSignedUrl => {
            debug!(agent_id = ?request.agent_id, "Relaying signed URL request");
            ConversationClient::new(state.config.elevenlabs_base_url.as_str(), api_key)
                .get_signed_url(request.agent_id.as_deref())
                .await
        }
        Action::Unknown => Err(RelayError::InvalidAction),
    }
}
