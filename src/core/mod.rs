pub mod elevenlabs;

pub use elevenlabs::ConversationClient;
