//! Lead enrichment processor.
//!
//! For each deferred work item: re-read the raw lead, read its lookup
//! record, merge the two (lookup wins), write the enriched object, send a
//! notification email. Items are processed strictly sequentially and a
//! failure aborts the remainder of the batch.

use mailer::{MailConfig, Mailer};
use pipeline_core::{
    enriched_object_key, lead_id, lookup_object_key, merge_records, unix_timestamp, Error, Result,
    WorkItem,
};
use queue::QueueMessage;
use serde_json::{Map, Value};
use std::sync::Arc;
use storage::ObjectStore;
use tracing::{debug, info};

use crate::notifications::enriched_lead_email;

/// Worker that turns deferred work items into enriched lead objects.
pub struct EnrichmentWorker {
    raw_store: Arc<dyn ObjectStore>,
    lookup_store: Arc<dyn ObjectStore>,
    enriched_store: Arc<dyn ObjectStore>,
    mailer: Arc<dyn Mailer>,
    mail_config: MailConfig,
}

impl EnrichmentWorker {
    pub fn new(
        raw_store: Arc<dyn ObjectStore>,
        lookup_store: Arc<dyn ObjectStore>,
        enriched_store: Arc<dyn ObjectStore>,
        mailer: Arc<dyn Mailer>,
        mail_config: MailConfig,
    ) -> Self {
        Self {
            raw_store,
            lookup_store,
            enriched_store,
            mailer,
            mail_config,
        }
    }

    /// Process a batch of queue messages sequentially.
    ///
    /// Returns the number of items enriched. The first failing item aborts
    /// the batch; the caller must not delete any of the batch's messages in
    /// that case, so the queue redelivers the whole batch.
    pub async fn process_batch(&self, messages: &[QueueMessage]) -> Result<usize> {
        let mut processed = 0;

        for message in messages {
            let enriched_key = self.process_item(message).await?;
            processed += 1;
            debug!(enriched_key = %enriched_key, "Enriched work item");
        }

        Ok(processed)
    }

    /// Process a single work item; returns the enriched object's key.
    async fn process_item(&self, message: &QueueMessage) -> Result<String> {
        let item = WorkItem::from_json(&message.body)?;

        // 1. Re-read the raw lead referenced by the work item
        let raw_bytes = self.raw_store.get(&item.s3_key).await?;
        let raw = parse_object(&raw_bytes)
            .ok_or_else(|| Error::internal(format!("raw object {} is not JSON", item.s3_key)))?;
        let lead = lead_id(&raw).to_string();

        // 2. Read the externally-populated lookup record
        let lookup_key = lookup_object_key(&lead);
        let lookup_bytes = self.lookup_store.get(&lookup_key).await?;
        let lookup = parse_object(&lookup_bytes)
            .ok_or_else(|| Error::internal(format!("lookup record {} is not JSON", lookup_key)))?;

        // 3. Merge, lookup record wins on collision
        let enriched = merge_records(&raw, &lookup);

        // 4. Write the enriched object under a fresh timestamped key
        let enriched_key = enriched_object_key(&lead, unix_timestamp());
        let enriched_json = serde_json::to_vec(&Value::Object(enriched))?;
        self.enriched_store
            .put(&enriched_key, enriched_json.into())
            .await?;

        // 5. Notify
        let email = enriched_lead_email(&self.mail_config, &lead, &raw, &lookup, &enriched_key);
        self.mailer.send(&email).await?;

        info!(
            lead_id = %lead,
            raw_key = %item.s3_key,
            enriched_key = %enriched_key,
            "Lead enriched"
        );

        Ok(enriched_key)
    }
}

fn parse_object(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
