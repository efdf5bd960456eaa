//! Admin user repository

use chrono::Utc;
use paperdesk_core::models::AdminUser;
use paperdesk_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "admin_users", db.operation = "select"))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, email, password_hash, created_at, last_login_at
            FROM admin_users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    /// Insert the bootstrap admin account if the email is not taken.
    /// Returns false when the account already existed.
    #[tracing::instrument(skip(self, password_hash), fields(
        db.table = "admin_users",
        db.operation = "insert"
    ))]
    pub async fn create_if_absent(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (id, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "admin_users", db.operation = "update"))]
    pub async fn record_login(&self, admin_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_users SET last_login_at = $2 WHERE id = $1")
            .bind(admin_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
