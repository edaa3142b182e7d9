//! Mail configuration.

use serde::{Deserialize, Serialize};

/// SES notification configuration.
///
/// Sender and recipients are required; startup validation rejects empty
/// values. The region falls back to `us-east-1` when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Verified sender address
    #[serde(default)]
    pub from_address: String,
    /// Comma-separated recipient list
    #[serde(default)]
    pub to_addresses: String,
    /// SES region
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override (e.g. LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: String::new(),
            to_addresses: String::new(),
            region: default_region(),
            endpoint: None,
        }
    }
}

impl MailConfig {
    /// Recipient list split out of the comma-separated config value.
    pub fn recipients(&self) -> Vec<String> {
        self.to_addresses
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
