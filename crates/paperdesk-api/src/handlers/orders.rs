//! Order creation and lookup

use axum::{
    extract::{Path, State},
    Json,
};
use paperdesk_core::models::{AnalyticsEvent, NewOrder, OrderResponse};
use paperdesk_core::{price_cents, AppError, Catalog, Service};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

fn default_quantity() -> i32 {
    1
}

/// An unknown service id is a 404; a known-but-disabled service is a 400,
/// so clients can tell a bad id from a temporarily unavailable offering.
fn resolve_service<'a>(catalog: &'a Catalog, service_id: &str) -> Result<&'a Service, AppError> {
    let service = catalog
        .lookup(service_id)
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", service_id)))?;
    if !service.enabled {
        return Err(AppError::InvalidInput(format!(
            "Service {} is not available",
            service_id
        )));
    }
    Ok(service)
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateOrderRequest {
    pub service_id: String,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub file_id: Option<Uuid>,
    #[serde(default)]
    pub extra_fields: serde_json::Value,
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created in pending state", body = OrderResponse),
        (status = 400, description = "Invalid order", body = ErrorResponse),
        (status = 404, description = "Service or file not found", body = ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let service = resolve_service(&state.catalog, &request.service_id)?;

    let missing = service.missing_extra_fields(&request.extra_fields);
    if !missing.is_empty() {
        return Err(AppError::MissingExtraFields(missing).into());
    }

    let amount_cents = price_cents(service, request.quantity).map_err(HttpAppError::from)?;

    let file_name = match request.file_id {
        Some(file_id) => {
            let file = state.files.get_required(file_id).await?;
            if file.deleted {
                return Err(
                    AppError::InvalidInput("File has already been deleted".to_string()).into(),
                );
            }
            Some(file.original_filename)
        }
        None => None,
    };

    let included: Vec<String> = service
        .kind
        .includes()
        .iter()
        .filter_map(|id| state.catalog.lookup(id))
        .map(|component| component.name.to_string())
        .collect();

    let new_order = NewOrder {
        id: Uuid::new_v4(),
        service_id: service.id.to_string(),
        service_name: service.name.to_string(),
        service_type: service.service_type().to_string(),
        unit: service.unit.to_string(),
        base_price_cents: service.base_price_cents,
        file_id: request.file_id,
        file_name,
        customer_name: request.customer_name,
        customer_email: request.customer_email,
        quantity: request.quantity,
        amount_cents,
        extra_fields: request.extra_fields,
        included_services: serde_json::json!(included),
    };

    let order = state.orders.create(&new_order).await?;
    tracing::info!(
        order_id = %order.id,
        service_id = %order.service_id,
        amount_cents = order.amount_cents,
        "Order created"
    );

    let event = AnalyticsEvent {
        event_type: "order_created".to_string(),
        order_id: order.id,
        service_id: order.service_id.clone(),
        amount_cents: order.amount_cents,
    };
    if let Err(error) = state.analytics.record_event(&event).await {
        tracing::warn!(order_id = %order.id, error = %error, "Analytics event not recorded");
    }

    Ok(Json(OrderResponse::from(order)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order status", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, HttpAppError> {
    let order = state.orders.get_required(id).await?;
    Ok(Json(OrderResponse::from(order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperdesk_core::models::{PricingUnit, Service, ServiceKind};
    use paperdesk_core::{Catalog, ErrorMetadata};

    fn test_catalog() -> Catalog {
        let services = vec![
            Service {
                id: "active_service",
                name: "Active",
                description: "",
                kind: ServiceKind::Conversion,
                base_price_cents: 100,
                unit: PricingUnit::PerFile,
                enabled: true,
                tags: &[],
                estimated_time: "",
            },
            Service {
                id: "retired_service",
                name: "Retired",
                description: "",
                kind: ServiceKind::Conversion,
                base_price_cents: 100,
                unit: PricingUnit::PerFile,
                enabled: false,
                tags: &[],
                estimated_time: "",
            },
        ];
        Catalog::new(services).expect("test catalog is valid")
    }

    #[test]
    fn test_unknown_service_is_not_found() {
        let catalog = test_catalog();
        let err = resolve_service(&catalog, "no_such_service").expect_err("unknown id");
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn test_disabled_service_is_bad_request_not_404() {
        let catalog = test_catalog();
        let err = resolve_service(&catalog, "retired_service").expect_err("disabled service");
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.http_status_code(), 400);
        assert!(err.client_message().contains("not available"));
    }

    #[test]
    fn test_enabled_service_resolves() {
        let catalog = test_catalog();
        let service = resolve_service(&catalog, "active_service").expect("enabled service");
        assert_eq!(service.id, "active_service");
    }
}
