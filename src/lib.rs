pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::{CredentialSource, ServerConfig};
pub use errors::relay_error::{RelayError, RelayResult};
pub use state::AppState;
