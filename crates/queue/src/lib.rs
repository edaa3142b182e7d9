//! SQS delay queue client for the lead pipeline.
//!
//! Ingestion publishes deferred work items with a fixed visibility delay;
//! the enrichment worker long-polls for batches and deletes messages only
//! after a batch fully succeeds, leaving redelivery to the queue.

pub mod config;
pub mod sqs;

pub use config::QueueConfig;
pub use sqs::SqsQueue;

use async_trait::async_trait;
use pipeline_core::Result;

/// A message received from the queue.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    /// Raw message body (JSON work item)
    pub body: String,
    /// Handle used to delete the message after processing
    pub receipt_handle: String,
}

/// A delay queue delivering messages at-least-once after a fixed delay.
#[async_trait]
pub trait DelayQueue: Send + Sync {
    /// Publish a message that becomes visible after the configured delay.
    async fn send_delayed(&self, body: String) -> Result<()>;

    /// Long-poll for a batch of visible messages (possibly empty).
    async fn receive(&self) -> Result<Vec<QueueMessage>>;

    /// Delete a processed message by its receipt handle.
    async fn delete(&self, receipt_handle: &str) -> Result<()>;
}
