//! Failure-path tests for both stages.
//!
//! The pipeline has no retry or rollback logic; these tests pin down what
//! state each failure leaves behind.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use queue::DelayQueue;

#[tokio::test]
async fn test_storage_failure_fails_ingest_with_no_enqueue() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.raw_store.set_should_fail(true);

    let response = server
        .post("/ingest")
        .content_type("application/json")
        .bytes(fixtures::payload_body(&fixtures::lead_payload("L1", "Jane")).into())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(ctx.queue.sent_bodies().is_empty(), "nothing should be enqueued");
}

#[tokio::test]
async fn test_queue_failure_fails_ingest_but_raw_write_remains() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.queue.set_should_fail(true);

    let response = server
        .post("/ingest")
        .content_type("application/json")
        .bytes(fixtures::payload_body(&fixtures::lead_payload("L1", "Jane")).into())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    // The raw write preceded the queue failure and is not rolled back
    assert_eq!(ctx.raw_store.object_count(), 1);
}

#[tokio::test]
async fn test_missing_lookup_record_fails_batch_without_side_effects() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    // No lookup record seeded for L1
    server
        .post("/ingest")
        .content_type("application/json")
        .bytes(fixtures::payload_body(&fixtures::lead_payload("L1", "Jane")).into())
        .await
        .assert_status_ok();

    let result = ctx.worker.poll_once().await;
    assert!(result.is_err());

    // No enriched object, no email, and the message stays queued for
    // redelivery
    assert_eq!(ctx.enriched_store.object_count(), 0);
    assert_eq!(ctx.mailer.sent_count(), 0);
    assert_eq!(ctx.queue.pending_count(), 1);
}

#[tokio::test]
async fn test_item_failure_aborts_batch_and_keeps_all_messages() {
    let ctx = TestContext::new();

    // First item references a missing raw object; second is fully valid
    ctx.queue
        .send_delayed(serde_json::json!({ "s3_key": "raw/crm_event_gone_0.json" }).to_string())
        .await
        .unwrap();

    ctx.raw_store.put_json(
        "raw/crm_event_L1_1704067200.json",
        &fixtures::lead_payload("L1", "Jane"),
    );
    ctx.lookup_store
        .put_json("L1.json", &fixtures::lookup_record("Bob", "Open", "2024-01-01"));
    ctx.queue
        .send_delayed(serde_json::json!({ "s3_key": "raw/crm_event_L1_1704067200.json" }).to_string())
        .await
        .unwrap();

    let result = ctx.worker.poll_once().await;
    assert!(result.is_err());

    // The valid item after the failure was never processed and both
    // messages remain for the queue to redeliver as a whole batch
    assert_eq!(ctx.enriched_store.object_count(), 0);
    assert_eq!(ctx.queue.pending_count(), 2);
}

#[tokio::test]
async fn test_mailer_failure_fails_batch_after_enriched_write() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.lookup_store
        .put_json("L1.json", &fixtures::lookup_record("Bob", "Open", "2024-01-01"));
    ctx.mailer.set_should_fail(true);

    server
        .post("/ingest")
        .content_type("application/json")
        .bytes(fixtures::payload_body(&fixtures::lead_payload("L1", "Jane")).into())
        .await
        .assert_status_ok();

    let result = ctx.worker.poll_once().await;
    assert!(result.is_err());

    // The enriched write happened before the mail failure; like the raw
    // write on the ingest path it is not rolled back, and the undeleted
    // message will redeliver the whole item
    assert_eq!(ctx.enriched_store.object_count(), 1);
    assert_eq!(ctx.queue.pending_count(), 1);
}

#[tokio::test]
async fn test_malformed_work_item_fails_batch() {
    let ctx = TestContext::new();

    ctx.queue.send_delayed("not json".to_string()).await.unwrap();

    let result = ctx.worker.poll_once().await;
    assert!(result.is_err());
    assert_eq!(ctx.queue.pending_count(), 1);
}
