//! ElevenLabs conversational AI client.
//!
//! Covers the one endpoint the relay needs: issuing a signed WebSocket URL for
//! a conversation with a configured agent.
//!
//! ```text
//! GET {base_url}/v1/convai/conversation/get_signed_url?agent_id=<agent>
//! xi-api-key: <key>
//! ```
//!
//! The expected success body is `{"signed_url": "wss://..."}`, but it is
//! forwarded without being inspected beyond a JSON well-formedness check.

mod client;

pub use client::{ConversationClient, ELEVENLABS_API_KEY_HEADER, ELEVENLABS_SIGNED_URL_PATH};
