//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Bucket configuration for the three object stores.
///
/// All bucket names are required; startup validation rejects empty values.
/// The lookup bucket may live in a different region than the default SDK
/// region, hence the explicit `lookup_region`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket receiving raw lead objects
    #[serde(default)]
    pub raw_bucket: String,
    /// Bucket receiving enriched lead objects
    #[serde(default)]
    pub enriched_bucket: String,
    /// Read-only bucket holding lookup records, populated externally
    #[serde(default)]
    pub lookup_bucket: String,
    /// Region of the lookup bucket
    #[serde(default)]
    pub lookup_region: String,
    /// Endpoint override for all S3 clients (e.g. LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,
}
