//! In-memory fakes for the pipeline's three external services.
//!
//! Each fake implements the same trait as its real S3/SQS/SES counterpart,
//! so tests exercise the production router and worker with only the network
//! transport swapped out.

use async_trait::async_trait;
use bytes::Bytes;
use mailer::{Mailer, OutboundEmail};
use parking_lot::Mutex;
use pipeline_core::{Error, Result};
use queue::{DelayQueue, QueueMessage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storage::ObjectStore;

/// In-memory object store keyed by string.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, Bytes>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object from a JSON value.
    pub fn put_json(&self, key: &str, value: &serde_json::Value) {
        self.objects.lock().insert(
            key.to_string(),
            serde_json::to_vec(value).expect("serializable value").into(),
        );
    }

    /// Read an object back as JSON.
    pub fn get_json(&self, key: &str) -> Option<serde_json::Value> {
        self.objects
            .lock()
            .get(key)
            .map(|bytes| serde_json::from_slice(bytes).expect("stored JSON"))
    }

    /// All stored keys, sorted for stable assertions.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, body: Bytes) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::storage("mock store failure"));
        }
        self.objects.lock().insert(key.to_string(), body);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        if *self.should_fail.lock() {
            return Err(Error::storage("mock store failure"));
        }
        self.objects
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::storage(format!("no such key: {}", key)))
    }
}

/// A message sitting in the in-memory queue.
#[derive(Debug, Clone)]
struct StoredMessage {
    id: usize,
    body: String,
}

/// In-memory delay queue.
///
/// The delay itself is not simulated; every undeleted message is visible to
/// the next `receive`, which also models redelivery after a failed batch.
#[derive(Clone, Default)]
pub struct MemoryQueue {
    messages: Arc<Mutex<Vec<StoredMessage>>>,
    sent_bodies: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicUsize>,
    should_fail: Arc<Mutex<bool>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// All message bodies ever sent, in order.
    pub fn sent_bodies(&self) -> Vec<String> {
        self.sent_bodies.lock().clone()
    }

    /// Messages currently visible in the queue.
    pub fn pending_count(&self) -> usize {
        self.messages.lock().len()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl DelayQueue for MemoryQueue {
    async fn send_delayed(&self, body: String) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::queue("mock queue failure"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent_bodies.lock().push(body.clone());
        self.messages.lock().push(StoredMessage { id, body });
        Ok(())
    }

    async fn receive(&self) -> Result<Vec<QueueMessage>> {
        if *self.should_fail.lock() {
            return Err(Error::queue("mock queue failure"));
        }
        Ok(self
            .messages
            .lock()
            .iter()
            .map(|m| QueueMessage {
                body: m.body.clone(),
                receipt_handle: format!("rh-{}", m.id),
            })
            .collect())
    }

    async fn delete(&self, receipt_handle: &str) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::queue("mock queue failure"));
        }
        self.messages
            .lock()
            .retain(|m| format!("rh-{}", m.id) != receipt_handle);
        Ok(())
    }
}

/// In-memory mailer capturing outbound emails.
#[derive(Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_emails(&self) -> Vec<OutboundEmail> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::mail("mock mailer failure"));
        }
        self.sent.lock().push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store.put("k", Bytes::from_static(b"v")).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Bytes::from_static(b"v"));
        assert!(store.get("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_queue_redelivers_until_deleted() {
        let queue = MemoryQueue::new();
        queue.send_delayed("m1".into()).await.unwrap();

        let first = queue.receive().await.unwrap();
        assert_eq!(first.len(), 1);

        // Not deleted, so it shows up again
        let second = queue.receive().await.unwrap();
        assert_eq!(second.len(), 1);

        queue.delete(&second[0].receipt_handle).await.unwrap();
        assert!(queue.receive().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_modes() {
        let store = MemoryStore::new();
        store.set_should_fail(true);
        assert!(store.put("k", Bytes::new()).await.is_err());

        let queue = MemoryQueue::new();
        queue.set_should_fail(true);
        assert!(queue.send_delayed("m".into()).await.is_err());

        let mail = MemoryMailer::new();
        mail.set_should_fail(true);
        let email = OutboundEmail {
            from: "a@b.c".into(),
            to: vec!["d@e.f".into()],
            subject: "s".into(),
            body_text: "b".into(),
        };
        assert!(mail.send(&email).await.is_err());
    }
}
