//! Application state shared across handlers.

use queue::DelayQueue;
use std::sync::Arc;
use storage::ObjectStore;

/// Shared application state.
///
/// Client handles are trait objects so tests can substitute in-memory
/// fakes for S3 and SQS.
#[derive(Clone)]
pub struct AppState {
    /// Raw lead object store
    pub raw_store: Arc<dyn ObjectStore>,
    /// Delay queue for deferred enrichment
    pub queue: Arc<dyn DelayQueue>,
}

impl AppState {
    pub fn new(raw_store: Arc<dyn ObjectStore>, queue: Arc<dyn DelayQueue>) -> Self {
        Self { raw_store, queue }
    }
}
