//! Result download

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use paperdesk_core::models::OrderStatus;
use paperdesk_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{storage_error_to_app, ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/orders/{id}/download",
    tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Processed result as an attachment"),
        (status = 400, description = "Order is not completed yet", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn download_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let order = state.orders.get_required(id).await?;
    ensure_completed(order.status)?;

    let output_key = order
        .output_key
        .as_deref()
        .ok_or_else(|| AppError::Internal("Completed order has no output".to_string()))?;
    let data = state
        .storage
        .download(output_key)
        .await
        .map_err(storage_error_to_app)?;

    let file_name = order.output_name.as_deref().unwrap_or("result.bin");
    let disposition = format!("attachment; filename=\"{}\"", sanitize_filename(file_name));
    let content_type = content_type_for(file_name);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_str(content_type)
                    .unwrap_or(HeaderValue::from_static("application/octet-stream")),
            ),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or(HeaderValue::from_static("attachment")),
            ),
        ],
        data,
    )
        .into_response())
}

/// Downloading before completion is a plain 400, not a status conflict.
fn ensure_completed(status: OrderStatus) -> Result<(), AppError> {
    if status != OrderStatus::Completed {
        return Err(AppError::BadRequest(format!(
            "Order not yet completed (status: {})",
            status
        )));
    }
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect()
}

fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next() {
        Some("txt") => "text/plain; charset=utf-8",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperdesk_core::ErrorMetadata;

    #[test]
    fn test_download_before_completion_is_bad_request() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Processing,
            OrderStatus::Failed,
            OrderStatus::Refunded,
        ] {
            let err = ensure_completed(status).expect_err("not downloadable");
            assert!(matches!(err, AppError::BadRequest(_)));
            assert_eq!(err.http_status_code(), 400);
            assert!(err.client_message().contains("not yet completed"));
        }
    }

    #[test]
    fn test_download_allowed_when_completed() {
        assert!(ensure_completed(OrderStatus::Completed).is_ok());
    }

    #[test]
    fn test_sanitize_filename_strips_quotes() {
        assert_eq!(sanitize_filename("re\"port.txt"), "re_port.txt");
        assert_eq!(sanitize_filename("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.xyz"), "application/octet-stream");
    }
}
