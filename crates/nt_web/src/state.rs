use std::sync::Arc;
use nt_core::ArticleStorage;

pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Largest request body a handler will buffer before rejecting it
    pub max_body_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self { max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }
}

pub struct AppState {
    pub storage: Arc<dyn ArticleStorage>,
    pub config: WebConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn ArticleStorage>) -> Self {
        Self { storage, config: WebConfig::default() }
    }

    pub fn with_config(mut self, config: WebConfig) -> Self {
        self.config = config;
        self
    }
}
