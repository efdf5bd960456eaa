//! Uploaded-file repository
//!
//! Rows outlive the bytes: shredding removes the object from storage and
//! flips `deleted` here, keeping the audit trail for the destruction
//! certificate.

use paperdesk_core::models::UploadedFile;
use paperdesk_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(
        db.table = "uploaded_files",
        db.operation = "insert",
        file_id = %file.id
    ))]
    pub async fn create(&self, file: &UploadedFile) -> Result<UploadedFile, AppError> {
        sqlx::query_as::<_, UploadedFile>(
            r#"
            INSERT INTO uploaded_files (id, original_filename, storage_key, content_type, size_bytes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, original_filename, storage_key, content_type, size_bytes, deleted, uploaded_at
            "#,
        )
        .bind(file.id)
        .bind(&file.original_filename)
        .bind(&file.storage_key)
        .bind(&file.content_type)
        .bind(file.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploaded_files", db.operation = "select"))]
    pub async fn get(&self, file_id: Uuid) -> Result<Option<UploadedFile>, AppError> {
        sqlx::query_as::<_, UploadedFile>(
            r#"
            SELECT id, original_filename, storage_key, content_type, size_bytes, deleted, uploaded_at
            FROM uploaded_files
            WHERE id = $1
            "#,
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    /// Fetch a file or return `NotFound`.
    pub async fn get_required(&self, file_id: Uuid) -> Result<UploadedFile, AppError> {
        self.get(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File {} not found", file_id)))
    }

    /// Mark the stored bytes as destroyed. Called after the storage delete
    /// succeeded, never before.
    #[tracing::instrument(skip(self), fields(db.table = "uploaded_files", db.operation = "update"))]
    pub async fn mark_deleted(&self, file_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE uploaded_files SET deleted = TRUE WHERE id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("File {} not found", file_id)));
        }
        Ok(())
    }
}
