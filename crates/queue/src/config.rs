//! Queue configuration.

use serde::{Deserialize, Serialize};

/// SQS queue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Queue URL (required; startup validation rejects empty values)
    #[serde(default)]
    pub queue_url: String,
    /// Delay before a published work item becomes visible, in seconds
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: i32,
    /// Maximum messages per receive call (SQS caps this at 10)
    #[serde(default = "default_receive_batch_size")]
    pub receive_batch_size: i32,
    /// Long-poll wait per receive call, in seconds
    #[serde(default = "default_wait_time_seconds")]
    pub wait_time_seconds: i32,
    /// Endpoint override (e.g. LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_delay_seconds() -> i32 {
    600
}

fn default_receive_batch_size() -> i32 {
    10
}

fn default_wait_time_seconds() -> i32 {
    20
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queue_url: String::new(),
            delay_seconds: default_delay_seconds(),
            receive_batch_size: default_receive_batch_size(),
            wait_time_seconds: default_wait_time_seconds(),
            endpoint: None,
        }
    }
}
