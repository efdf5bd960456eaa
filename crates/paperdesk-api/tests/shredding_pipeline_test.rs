//! Background pipeline integration tests for shredding orders.
//!
//! Run with: `cargo test -p paperdesk-api --test shredding_pipeline_test --features integration`
//! Requires Docker for testcontainers (Postgres).

#![cfg(feature = "integration")]

mod helpers;

use helpers::{pending_order, seed_uploaded_file, setup_test_app, wait_for_status};
use paperdesk_api::pipeline;
use paperdesk_core::OrderStatus;

#[tokio::test]
async fn test_shred_destroys_stored_file_then_issues_certificate() {
    let app = setup_test_app().await;
    let file = seed_uploaded_file(&app, b"sensitive contents").await;

    let order = app
        .state
        .orders
        .create(&pending_order("secure_shred_basic", "shredding", Some(file.id)))
        .await
        .expect("create order");
    app.state
        .orders
        .mark_paid(order.id, "CAPTURE-SHRED")
        .await
        .expect("capture");

    pipeline::spawn_processing(app.state.clone(), order.id);
    let done = wait_for_status(
        &app.state.orders,
        order.id,
        &[OrderStatus::Completed, OrderStatus::Failed],
    )
    .await;

    assert_eq!(done.status, OrderStatus::Completed);
    let gone = !app
        .state
        .storage
        .exists(&file.storage_key)
        .await
        .expect("exists check");
    assert!(gone, "stored bytes must be destroyed");
    let row = app.state.files.get_required(file.id).await.expect("file row");
    assert!(row.deleted);

    let output_key = done.output_key.expect("certificate output key");
    let certificate = app
        .state
        .storage
        .download(&output_key)
        .await
        .expect("certificate artifact");
    assert!(!certificate.is_empty());
}

#[tokio::test]
async fn test_failed_destruction_issues_no_certificate() {
    let app = setup_test_app().await;
    let file = seed_uploaded_file(&app, b"sensitive contents").await;
    // The stored object disappears out from under the order, so the delete
    // cannot succeed and no certificate may be produced.
    app.state
        .storage
        .delete(&file.storage_key)
        .await
        .expect("remove stored object");

    let order = app
        .state
        .orders
        .create(&pending_order("secure_shred_basic", "shredding", Some(file.id)))
        .await
        .expect("create order");
    app.state
        .orders
        .mark_paid(order.id, "CAPTURE-SHRED")
        .await
        .expect("capture");

    pipeline::spawn_processing(app.state.clone(), order.id);
    let done = wait_for_status(
        &app.state.orders,
        order.id,
        &[OrderStatus::Completed, OrderStatus::Failed],
    )
    .await;

    assert_eq!(done.status, OrderStatus::Failed);
    assert!(done.output_key.is_none(), "no certificate for a failed delete");
    assert!(done.error_message.is_some());

    let row = app.state.files.get_required(file.id).await.expect("file row");
    assert!(!row.deleted, "row is only marked after a successful delete");
}
