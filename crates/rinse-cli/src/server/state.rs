//! Application state for the web server.

use std::sync::Arc;

use rinse::Pipeline;

/// Shared application state.
///
/// Requests share the configured pipeline read-only; every request builds
/// and cleans its own table.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

/// Default request body cap: 64 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024 * 1024;

impl AppState {
    /// Create new application state.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Set the request body cap.
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}
