//! Admin endpoints: login, order management, analytics
//!
//! Everything except login sits behind the bearer-token middleware.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use paperdesk_core::models::{
    AnalyticsEvent, AnalyticsSummary, DailyRevenue, OrderResponse, OrderStatus, OrderSummary,
};
use paperdesk_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{jwt, AdminContext};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::pipeline;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;
const DEFAULT_REVENUE_DAYS: i64 = 30;
const MAX_REVENUE_DAYS: i64 = 365;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub expires_in_hours: i64,
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpAppError> {
    let admin = state
        .admins
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = bcrypt::verify(&request.password, &admin.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()).into());
    }

    let token = jwt::issue_token(
        state.config.jwt_secret(),
        admin.id,
        &admin.email,
        state.config.jwt_expiry_hours(),
    )?;

    if let Err(error) = state.admins.record_login(admin.id).await {
        tracing::warn!(admin_id = %admin.id, error = %error, "Could not record login time");
    }
    tracing::info!(admin_id = %admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        email: admin.email,
        expires_in_hours: state.config.jwt_expiry_hours(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard analytics", body = AnalyticsSummary),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
) -> Result<Json<AnalyticsSummary>, HttpAppError> {
    let summary = state.analytics.summary().await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<OrderSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by order status"),
        ("limit" = Option<i64>, Query, description = "Page size (max 200)"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Paginated orders, newest first", body = OrderListResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse)
    )
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, HttpAppError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            OrderStatus::parse(raw)
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown order status: {}", raw)))?,
        ),
        None => None,
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let (orders, total) = state.orders.list(status, limit, offset).await?;
    Ok(Json(OrderListResponse {
        orders,
        total,
        limit,
        offset,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, HttpAppError> {
    let order = state.orders.get_required(id).await?;
    Ok(Json(OrderResponse::from(order)))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/reprocess",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order queued for reprocessing", body = OrderResponse),
        (status = 409, description = "Order cannot be reprocessed", body = ErrorResponse)
    )
)]
pub async fn reprocess_order(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, HttpAppError> {
    let order = state.orders.reset_to_paid(id).await?;
    tracing::info!(order_id = %order.id, admin = %admin.email, "Order queued for reprocessing");

    pipeline::spawn_processing(state.clone(), order.id);

    Ok(Json(OrderResponse::from(order)))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/refund",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order marked refunded", body = OrderResponse),
        (status = 409, description = "Order cannot be refunded", body = ErrorResponse)
    )
)]
pub async fn refund_order(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, HttpAppError> {
    let order = state.orders.refund(id).await?;
    tracing::info!(order_id = %order.id, admin = %admin.email, "Order refunded");

    let event = AnalyticsEvent {
        event_type: "order_refunded".to_string(),
        order_id: order.id,
        service_id: order.service_id.clone(),
        amount_cents: order.amount_cents,
    };
    if let Err(error) = state.analytics.record_event(&event).await {
        tracing::warn!(order_id = %order.id, error = %error, "Analytics event not recorded");
    }

    Ok(Json(OrderResponse::from(order)))
}

#[derive(Debug, Deserialize)]
pub struct RevenueSummaryQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RevenueSummaryResponse {
    pub days: i64,
    pub daily: Vec<DailyRevenue>,
}

#[utoipa::path(
    get,
    path = "/api/admin/revenue-summary",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("days" = Option<i64>, Query, description = "Trailing window in days (default 30, max 365)")),
    responses(
        (status = 200, description = "Daily revenue over the window", body = RevenueSummaryResponse)
    )
)]
pub async fn revenue_summary(
    State(state): State<Arc<AppState>>,
    _admin: AdminContext,
    Query(query): Query<RevenueSummaryQuery>,
) -> Result<Json<RevenueSummaryResponse>, HttpAppError> {
    let days = query
        .days
        .unwrap_or(DEFAULT_REVENUE_DAYS)
        .clamp(1, MAX_REVENUE_DAYS);
    let daily = state.analytics.daily_revenue(days).await?;
    Ok(Json(RevenueSummaryResponse { days, daily }))
}
