//! S3-backed object stores for the lead pipeline.
//!
//! The pipeline talks to three buckets (raw, lookup, enriched) through the
//! same `ObjectStore` trait; each handle is bound to exactly one bucket.
//! Tests substitute in-memory implementations.

pub mod config;
pub mod s3;

pub use config::StorageConfig;
pub use s3::S3Store;

use async_trait::async_trait;
use bytes::Bytes;
use pipeline_core::Result;

/// A durable blob store addressed by string key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object at `key`, overwriting any existing object.
    async fn put(&self, key: &str, body: Bytes) -> Result<()>;

    /// Read the object at `key`. A missing key is an error.
    async fn get(&self, key: &str) -> Result<Bytes>;
}
