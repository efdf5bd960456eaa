//! Uploaded file models

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// An uploaded customer file tracked in the database.
/// `deleted` is set when a shredding service destroys the stored bytes.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UploadedFile {
    pub id: Uuid,
    pub original_filename: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub deleted: bool,
    pub uploaded_at: DateTime<Utc>,
}

/// Upload acknowledgement returned to the client
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub file_id: Uuid,
    pub file_name: String,
    pub size_bytes: i64,
}

impl From<&UploadedFile> for UploadResponse {
    fn from(file: &UploadedFile) -> Self {
        UploadResponse {
            file_id: file.id,
            file_name: file.original_filename.clone(),
            size_bytes: file.size_bytes,
        }
    }
}
