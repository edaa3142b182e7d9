//! Queue polling loop driving the enrichment worker.
//!
//! Long-poll → process batch → delete on success. Messages from a failed
//! batch are never deleted; they reappear after the queue's visibility
//! timeout, so retry is entirely the queue's redelivery policy.

use queue::DelayQueue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::enrichment::EnrichmentWorker;

/// Queue worker configuration.
#[derive(Debug, Clone)]
pub struct QueueWorkerConfig {
    /// Pause after a failed poll or batch before polling again
    pub error_pause: Duration,
}

impl Default for QueueWorkerConfig {
    fn default() -> Self {
        Self {
            error_pause: Duration::from_secs(1),
        }
    }
}

/// Worker that pumps queue batches through the enrichment processor.
pub struct QueueWorker {
    queue: Arc<dyn DelayQueue>,
    enricher: EnrichmentWorker,
    config: QueueWorkerConfig,
}

impl QueueWorker {
    pub fn new(queue: Arc<dyn DelayQueue>, enricher: EnrichmentWorker) -> Self {
        Self {
            queue,
            enricher,
            config: QueueWorkerConfig::default(),
        }
    }

    pub fn with_config(
        queue: Arc<dyn DelayQueue>,
        enricher: EnrichmentWorker,
        config: QueueWorkerConfig,
    ) -> Self {
        Self {
            queue,
            enricher,
            config,
        }
    }

    /// Main run loop: poll, process, delete. Runs until the task is aborted.
    pub async fn run(&self) {
        info!("Enrichment queue worker starting");

        loop {
            match self.poll_once().await {
                Ok(count) => {
                    if count > 0 {
                        debug!(count = count, "Processed batch");
                    }
                }
                Err(e) => {
                    error!("Batch processing error: {}", e);
                    tokio::time::sleep(self.config.error_pause).await;
                }
            }
        }
    }

    /// Single poll cycle: returns the number of items enriched.
    ///
    /// Deletion happens only after the whole batch succeeded, keeping the
    /// queue's at-least-once semantics authoritative on failure.
    pub async fn poll_once(&self) -> pipeline_core::Result<usize> {
        let messages = self.queue.receive().await?;

        if messages.is_empty() {
            return Ok(0);
        }

        let processed = self.enricher.process_batch(&messages).await?;

        for message in &messages {
            self.queue.delete(&message.receipt_handle).await?;
        }

        Ok(processed)
    }
}
