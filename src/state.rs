use std::sync::Arc;

use crate::config::ServerConfig;

/// State shared with every handler.
///
/// Holds configuration only. There are no caches or connection pools; the
/// upstream credential is resolved from `config` on each request.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }
}
