//! HTTP request handlers
//!
//! - `conversation` - ElevenLabs signed conversation URL relay

pub mod conversation;
