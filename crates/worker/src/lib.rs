//! Background worker for the lead pipeline.
//!
//! Handles the deferred half of the pipeline:
//! - Enrichment (raw lead + lookup record → enriched object)
//! - Notifications (email per enriched lead)
//! - Queue polling loop (long-poll, process, delete on success)

pub mod consumer;
pub mod enrichment;
pub mod notifications;

pub use consumer::{QueueWorker, QueueWorkerConfig};
pub use enrichment::EnrichmentWorker;
