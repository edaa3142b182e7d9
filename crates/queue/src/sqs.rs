//! SQS implementation of the delay queue.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use pipeline_core::{Error, Result};
use tracing::debug;

use crate::{DelayQueue, QueueConfig, QueueMessage};

/// Delay queue backed by a single SQS queue.
pub struct SqsQueue {
    client: Client,
    config: QueueConfig,
}

impl SqsQueue {
    /// Creates a queue client from the shared SDK config.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: QueueConfig) -> Self {
        let mut builder = aws_sdk_sqs::config::Builder::from(sdk_config);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            config,
        }
    }

    /// Create from a pre-built client (for testing).
    pub fn from_client(client: Client, config: QueueConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }
}

#[async_trait]
impl DelayQueue for SqsQueue {
    async fn send_delayed(&self, body: String) -> Result<()> {
        debug!(
            queue_url = %self.config.queue_url,
            delay_seconds = self.config.delay_seconds,
            "Sending delayed message"
        );

        self.client
            .send_message()
            .queue_url(&self.config.queue_url)
            .message_body(body)
            .delay_seconds(self.config.delay_seconds)
            .send()
            .await
            .map_err(|e| Error::queue(format!("send_message failed: {}", e)))?;

        Ok(())
    }

    async fn receive(&self) -> Result<Vec<QueueMessage>> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.receive_batch_size)
            .wait_time_seconds(self.config.wait_time_seconds)
            .send()
            .await
            .map_err(|e| Error::queue(format!("receive_message failed: {}", e)))?;

        let messages = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| {
                // A message without body or receipt handle cannot be
                // processed or deleted; skip it rather than fail the poll.
                match (m.body, m.receipt_handle) {
                    (Some(body), Some(receipt_handle)) => Some(QueueMessage {
                        body,
                        receipt_handle,
                    }),
                    _ => None,
                }
            })
            .collect::<Vec<_>>();

        if !messages.is_empty() {
            debug!(count = messages.len(), "Received messages");
        }

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<()> {
        self.client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| Error::queue(format!("delete_message failed: {}", e)))?;

        Ok(())
    }
}
