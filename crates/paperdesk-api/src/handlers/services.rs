//! Public catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use paperdesk_core::models::ServiceResponse;
use paperdesk_core::{AppError, CatalogFilter, ServiceType};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// Service detail: the service plus, for bundles, the expanded components.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ServiceDetailResponse {
    #[serde(flatten)]
    pub service: ServiceResponse,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ServiceResponse>,
}

#[utoipa::path(
    get,
    path = "/api/services",
    tag = "services",
    params(
        ("type" = Option<String>, Query, description = "Filter by service type"),
        ("tag" = Option<String>, Query, description = "Filter by tag (exact, case-insensitive)"),
        ("search" = Option<String>, Query, description = "Substring search over name, description, tags")
    ),
    responses(
        (status = 200, description = "Enabled services matching the filter", body = [ServiceResponse]),
        (status = 400, description = "Unknown service type", body = ErrorResponse)
    )
)]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<Vec<ServiceResponse>>, HttpAppError> {
    let service_type = match query.service_type.as_deref() {
        Some(raw) => Some(ServiceType::parse(raw).ok_or_else(|| {
            AppError::InvalidInput(format!("Unknown service type: {}", raw))
        })?),
        None => None,
    };

    let filter = CatalogFilter {
        service_type,
        tag: query.tag,
        search: query.search,
    };

    let services = state
        .catalog
        .list_enabled(&filter)
        .into_iter()
        .map(ServiceResponse::from)
        .collect();

    Ok(Json(services))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service detail with bundle components", body = ServiceDetailResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceDetailResponse>, HttpAppError> {
    let service = state
        .catalog
        .lookup(&id)
        .filter(|s| s.enabled)
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;

    // Catalog construction guarantees components resolve.
    let components = service
        .kind
        .includes()
        .iter()
        .filter_map(|component_id| state.catalog.lookup(component_id))
        .map(ServiceResponse::from)
        .collect();

    Ok(Json(ServiceDetailResponse {
        service: ServiceResponse::from(service),
        components,
    }))
}
