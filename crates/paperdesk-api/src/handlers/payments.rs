//! Payment creation and capture
//!
//! Capture marks the order paid only from pending, so a duplicate capture
//! request cannot re-trigger processing.

use axum::{extract::State, Json};
use paperdesk_core::models::{AnalyticsEvent, OrderResponse, OrderStatus};
use paperdesk_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::pipeline;
use crate::services::paypal::PayPalClient;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePaymentRequest {
    pub order_id: Uuid,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatePaymentResponse {
    pub order_id: Uuid,
    pub paypal_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CapturePaymentRequest {
    pub order_id: Uuid,
    /// Optional cross-check against the PayPal order stored for this order.
    pub paypal_order_id: Option<String>,
}

fn paypal_client(state: &AppState) -> Result<&PayPalClient, AppError> {
    state
        .paypal
        .as_ref()
        .ok_or_else(|| AppError::PaymentProvider("PayPal is not configured".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/payments/create",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "PayPal order created", body = CreatePaymentResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order is not pending", body = ErrorResponse),
        (status = 502, description = "Payment provider unavailable", body = ErrorResponse)
    )
)]
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreatePaymentRequest>,
) -> Result<Json<CreatePaymentResponse>, HttpAppError> {
    let paypal = paypal_client(&state)?;
    let order = state.orders.get_required(request.order_id).await?;

    if order.status != OrderStatus::Pending {
        return Err(AppError::InvalidOrderStatus {
            current: order.status.to_string(),
            action: "create a payment".to_string(),
        }
        .into());
    }

    let created = paypal
        .create_order(order.id, order.amount_cents, &order.service_name)
        .await?;
    state
        .orders
        .set_paypal_order(order.id, &created.paypal_order_id)
        .await?;

    Ok(Json(CreatePaymentResponse {
        order_id: order.id,
        paypal_order_id: created.paypal_order_id,
        approve_url: created.approve_url,
    }))
}

#[utoipa::path(
    post,
    path = "/api/payments/capture",
    tag = "payments",
    request_body = CapturePaymentRequest,
    responses(
        (status = 200, description = "Payment captured, processing started", body = OrderResponse),
        (status = 400, description = "Payment was not completed", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order already captured", body = ErrorResponse),
        (status = 502, description = "Payment provider unavailable", body = ErrorResponse)
    )
)]
pub async fn capture_payment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CapturePaymentRequest>,
) -> Result<Json<OrderResponse>, HttpAppError> {
    let paypal = paypal_client(&state)?;
    let order = state.orders.get_required(request.order_id).await?;

    let paypal_order_id = order.paypal_order_id.clone().ok_or_else(|| {
        AppError::BadRequest("Order has no payment to capture".to_string())
    })?;
    if let Some(claimed) = &request.paypal_order_id {
        if claimed != &paypal_order_id {
            return Err(AppError::BadRequest(
                "PayPal order id does not match this order".to_string(),
            )
            .into());
        }
    }

    let captured = paypal.capture_order(&paypal_order_id).await?;
    let paid = state
        .orders
        .mark_paid(order.id, &captured.capture_id)
        .await?;

    tracing::info!(
        order_id = %paid.id,
        capture_id = %captured.capture_id,
        "Payment captured"
    );

    let event = AnalyticsEvent {
        event_type: "payment_completed".to_string(),
        order_id: paid.id,
        service_id: paid.service_id.clone(),
        amount_cents: paid.amount_cents,
    };
    if let Err(error) = state.analytics.record_event(&event).await {
        tracing::warn!(order_id = %paid.id, error = %error, "Analytics event not recorded");
    }

    pipeline::spawn_processing(state.clone(), paid.id);

    Ok(Json(OrderResponse::from(paid)))
}
