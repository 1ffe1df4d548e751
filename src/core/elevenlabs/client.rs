use bytes::Bytes;
use reqwest::header::HeaderValue;
use serde::de::IgnoredAny;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::errors::relay_error::{RelayError, RelayResult};

/// Path of the signed conversation URL endpoint, relative to the API base URL
pub const ELEVENLABS_SIGNED_URL_PATH: &str = "/v1/convai/conversation/get_signed_url";

/// Header carrying the ElevenLabs API key
pub const ELEVENLABS_API_KEY_HEADER: &str = "xi-api-key";

/// One-shot client for the ElevenLabs conversational AI API.
///
/// A client is built per request and dropped with it, together with the
/// zeroized copy of the API key.
pub struct ConversationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Zeroizing<String>,
}

impl ConversationClient {
    pub fn new(base_url: impl Into<String>, api_key: Zeroizing<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Build the outbound signed URL request without sending it.
    ///
    /// The API key only travels in the `xi-api-key` header, flagged sensitive.
    /// `agent_id` is passed through as the `agent_id` query parameter and is
    /// omitted when absent.
    pub fn signed_url_request(&self, agent_id: Option<&str>) -> RelayResult<reqwest::Request> {
        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            RelayError::Unexpected("ElevenLabs API key is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let mut builder = self
            .client
            .get(format!("{}{}", self.base_url, ELEVENLABS_SIGNED_URL_PATH))
            .header(ELEVENLABS_API_KEY_HEADER, api_key);

        if let Some(agent_id) = agent_id {
            builder = builder.query(&[("agent_id", agent_id)]);
        }

        Ok(builder.build()?)
    }

    /// Request a signed conversation URL.
    ///
    /// On success the upstream body is returned untouched, after checking that
    /// it is well-formed JSON. A non-success status becomes
    /// [`RelayError::Upstream`]; the upstream body is only logged.
    pub async fn get_signed_url(&self, agent_id: Option<&str>) -> RelayResult<Bytes> {
        let request = self.signed_url_request(agent_id)?;
        debug!(url = %request.url(), "Requesting signed URL from ElevenLabs");

        let response = self.client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %error_body,
                "ElevenLabs API error"
            );
            return Err(RelayError::Upstream(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)?;

        Ok(body)
    }
}
