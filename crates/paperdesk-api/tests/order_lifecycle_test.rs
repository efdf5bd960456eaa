//! Order lifecycle integration tests.
//!
//! Run with: `cargo test -p paperdesk-api --test order_lifecycle_test --features integration`
//! Requires Docker for testcontainers (Postgres).

#![cfg(feature = "integration")]

mod helpers;

use helpers::{pending_order, setup_test_app};
use paperdesk_core::{AppError, OrderStatus};

#[tokio::test]
async fn test_capture_only_succeeds_once() {
    let app = setup_test_app().await;
    let orders = &app.state.orders;

    let order = orders
        .create(&pending_order("pdf_to_word", "conversion", None))
        .await
        .expect("create order");
    assert_eq!(order.status, OrderStatus::Pending);

    let paid = orders
        .mark_paid(order.id, "CAPTURE-1")
        .await
        .expect("first capture");
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(paid.paypal_capture_id.as_deref(), Some("CAPTURE-1"));
    assert!(paid.paid_at.is_some());

    let err = orders
        .mark_paid(order.id, "CAPTURE-2")
        .await
        .expect_err("second capture is rejected");
    match err {
        AppError::InvalidOrderStatus { current, .. } => assert_eq!(current, "paid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_transitions_require_prior_status() {
    let app = setup_test_app().await;
    let orders = &app.state.orders;

    let order = orders
        .create(&pending_order("pdf_to_word", "conversion", None))
        .await
        .expect("create order");

    // None of these are reachable from pending.
    let err = orders
        .mark_processing(order.id)
        .await
        .expect_err("processing from pending");
    match err {
        AppError::InvalidOrderStatus { current, .. } => assert_eq!(current, "pending"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(orders
        .complete(order.id, "outputs/x.txt", "x.txt")
        .await
        .is_err());
    assert!(orders.refund(order.id).await.is_err());

    let reloaded = orders
        .get_required(order.id)
        .await
        .expect("order still exists");
    assert_eq!(reloaded.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_paid_processing_completed_refunded_path() {
    let app = setup_test_app().await;
    let orders = &app.state.orders;

    let order = orders
        .create(&pending_order("pdf_to_word", "conversion", None))
        .await
        .expect("create order");
    orders.mark_paid(order.id, "CAPTURE-1").await.expect("paid");

    let processing = orders.mark_processing(order.id).await.expect("processing");
    assert_eq!(processing.status, OrderStatus::Processing);
    assert!(processing.processed_at.is_some());

    let completed = orders
        .complete(order.id, "outputs/result.txt", "result.txt")
        .await
        .expect("completed");
    assert_eq!(completed.status, OrderStatus::Completed);
    assert_eq!(completed.output_key.as_deref(), Some("outputs/result.txt"));
    assert!(completed.completed_at.is_some());

    let refunded = orders.refund(order.id).await.expect("refund completed order");
    assert_eq!(refunded.status, OrderStatus::Refunded);
}

#[tokio::test]
async fn test_reset_to_paid_clears_failure_state() {
    let app = setup_test_app().await;
    let orders = &app.state.orders;

    let order = orders
        .create(&pending_order("pdf_to_word", "conversion", None))
        .await
        .expect("create order");
    orders.mark_paid(order.id, "CAPTURE-1").await.expect("paid");
    orders.mark_processing(order.id).await.expect("processing");
    orders
        .fail(order.id, "converter crashed")
        .await
        .expect("mark failed");

    let failed = orders.get_required(order.id).await.expect("failed order");
    assert_eq!(failed.status, OrderStatus::Failed);
    assert_eq!(failed.error_message.as_deref(), Some("converter crashed"));

    let reset = orders.reset_to_paid(order.id).await.expect("reset for retry");
    assert_eq!(reset.status, OrderStatus::Paid);
    assert!(reset.error_message.is_none());
    assert!(reset.output_key.is_none());
}
