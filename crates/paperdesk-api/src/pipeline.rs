//! Background order processing
//!
//! Runs after payment capture (and on admin reprocess) in a spawned task.
//! The order moves paid -> processing -> completed, or to failed with the
//! error message recorded. For shredding services the stored bytes are
//! deleted before the destruction certificate is generated; if the delete
//! fails, no certificate is issued.

use paperdesk_core::models::{AnalyticsEvent, Order};
use paperdesk_core::AppError;
use paperdesk_processing::ProcessContext;
use paperdesk_storage::keys;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{process_error_to_app, storage_error_to_app};
use crate::state::AppState;

/// Kick off processing for a paid order. Errors inside the task mark the
/// order failed; they never propagate to the request that spawned it.
pub fn spawn_processing(state: Arc<AppState>, order_id: Uuid) {
    tokio::spawn(async move {
        if let Err(error) = process_order(&state, order_id).await {
            tracing::error!(order_id = %order_id, error = %error, "Order processing failed");
            if let Err(fail_error) = state.orders.fail(order_id, &error.to_string()).await {
                tracing::error!(
                    order_id = %order_id,
                    error = %fail_error,
                    "Could not mark order as failed"
                );
            }
            record_event(&state, order_id, "order_failed").await;
        }
    });
}

async fn process_order(state: &Arc<AppState>, order_id: Uuid) -> Result<(), AppError> {
    let order = state.orders.mark_processing(order_id).await?;
    tracing::info!(
        order_id = %order.id,
        service_id = %order.service_id,
        "Processing order"
    );

    let input = load_input(state, &order).await?;

    let included: Vec<String> =
        serde_json::from_value(order.included_services.clone()).unwrap_or_default();
    let ctx = ProcessContext {
        order_id: order.id,
        service_id: &order.service_id,
        service_name: &order.service_name,
        service_type: &order.service_type,
        customer_name: &order.customer_name,
        input_filename: order.file_name.as_deref().unwrap_or(""),
        extra_fields: &order.extra_fields,
        included_services: &included,
    };

    let artifact = paperdesk_processing::process(&ctx, &input).map_err(process_error_to_app)?;

    let label = artifact
        .file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&artifact.file_name);
    let output_key = keys::output_key(order.id, label, artifact.extension());
    state
        .storage
        .upload_with_key(&output_key, artifact.data.clone(), &artifact.content_type)
        .await
        .map_err(storage_error_to_app)?;

    let completed = state
        .orders
        .complete(order.id, &output_key, &artifact.file_name)
        .await?;
    tracing::info!(
        order_id = %completed.id,
        output_key = %output_key,
        "Order completed"
    );

    record_event(state, order.id, "order_completed").await;

    if let Some(email) = &state.email {
        if let Err(error) = email
            .send_order_result(
                &completed,
                &artifact.file_name,
                &artifact.content_type,
                artifact.data,
            )
            .await
        {
            tracing::warn!(
                order_id = %completed.id,
                error = %error,
                "Result email delivery failed"
            );
        }
    }

    Ok(())
}

/// Load the input bytes for the order, honoring the shredding contract:
/// the stored object is destroyed before any certificate is produced.
async fn load_input(state: &Arc<AppState>, order: &Order) -> Result<Vec<u8>, AppError> {
    if order.service_type == "shredding" {
        let file_id = order
            .file_id
            .ok_or_else(|| AppError::Processing("Shredding order has no file".to_string()))?;
        let file = state.files.get_required(file_id).await?;
        state
            .storage
            .delete(&file.storage_key)
            .await
            .map_err(storage_error_to_app)?;
        state.files.mark_deleted(file_id).await?;
        tracing::info!(
            order_id = %order.id,
            file_id = %file_id,
            "Stored file destroyed"
        );
        return Ok(Vec::new());
    }

    match order.file_id {
        Some(file_id) => {
            let file = state.files.get_required(file_id).await?;
            if file.deleted {
                return Err(AppError::Processing(
                    "Input file has been deleted".to_string(),
                ));
            }
            state
                .storage
                .download(&file.storage_key)
                .await
                .map_err(storage_error_to_app)
        }
        None => Ok(Vec::new()),
    }
}

/// Record an analytics milestone; failures are logged and never affect the order.
async fn record_event(state: &Arc<AppState>, order_id: Uuid, event_type: &str) {
    let order = match state.orders.get(order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => return,
        Err(error) => {
            tracing::warn!(order_id = %order_id, error = %error, "Could not load order for analytics");
            return;
        }
    };
    let event = AnalyticsEvent {
        event_type: event_type.to_string(),
        order_id,
        service_id: order.service_id.clone(),
        amount_cents: order.amount_cents,
    };
    if let Err(error) = state.analytics.record_event(&event).await {
        tracing::warn!(order_id = %order_id, error = %error, "Analytics event not recorded");
    }
}
