//! Multipart file upload

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use paperdesk_core::models::{UploadResponse, UploadedFile};
use paperdesk_core::AppError;
use paperdesk_storage::keys;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::BadRequest("Missing file name".to_string()))?;
        let content_type = field
            .content_type()
            .map(String::from)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, content_type, data.to_vec()));
        break;
    }

    let (filename, content_type, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;

    if data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()).into());
    }
    if data.len() > state.config.max_upload_size_bytes() {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            data.len(),
            state.config.max_upload_size_bytes()
        ))
        .into());
    }

    let file_id = Uuid::new_v4();
    let size_bytes = data.len() as i64;
    let storage_key = keys::upload_key(file_id, &filename);
    state
        .storage
        .upload_with_key(&storage_key, data, &content_type)
        .await
        .map_err(crate::error::storage_error_to_app)?;

    let file = UploadedFile {
        id: file_id,
        original_filename: filename,
        storage_key,
        content_type,
        size_bytes,
        deleted: false,
        uploaded_at: Utc::now(),
    };
    let created = state.files.create(&file).await?;

    tracing::info!(
        file_id = %created.id,
        size_bytes = created.size_bytes,
        "File uploaded"
    );
    Ok(Json(UploadResponse::from(&created)))
}
