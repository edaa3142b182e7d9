//! S3 implementation of the object store.

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use pipeline_core::{Error, Result};
use tracing::debug;

use crate::ObjectStore;

/// Object store bound to a single S3 bucket.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Creates a store from the shared SDK config, with optional region and
    /// endpoint overrides.
    ///
    /// Inheriting from `SdkConfig` preserves the credential chain, retry
    /// config, and HTTP client; overrides apply on top.
    pub fn new(
        sdk_config: &aws_config::SdkConfig,
        bucket: impl Into<String>,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);

        if let Some(region) = region {
            builder = builder.region(Region::new(region));
        }

        if let Some(endpoint) = endpoint {
            // Path-style addressing is what LocalStack-style endpoints expect
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: bucket.into(),
        }
    }

    /// Create from a pre-built client (for testing).
    pub fn from_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, body: Bytes) -> Result<()> {
        debug!(bucket = %self.bucket, key = %key, size = body.len(), "Putting object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                Error::storage(format!("put {}/{} failed: {}", self.bucket, key, e))
            })?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        debug!(bucket = %self.bucket, key = %key, "Getting object");

        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                Error::storage(format!("get {}/{} failed: {}", self.bucket, key, e))
            })?;

        let data = output.body.collect().await.map_err(|e| {
            Error::storage(format!("read {}/{} body failed: {}", self.bucket, key, e))
        })?;

        Ok(data.into_bytes())
    }
}
