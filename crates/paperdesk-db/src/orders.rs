//! Order repository
//!
//! Lifecycle transitions use conditional updates (`WHERE status IN (...)`)
//! and report the actual current status when a transition is rejected.
//! `mark_paid` only succeeds from `pending`, which makes a duplicate
//! payment capture a no-op instead of re-triggering processing.

use chrono::Utc;
use paperdesk_core::models::{NewOrder, Order, OrderStatus, OrderSummary};
use paperdesk_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, service_id, service_name, service_type, unit, base_price_cents, \
     file_id, file_name, customer_name, customer_email, quantity, amount_cents, status, \
     extra_fields, included_services, paypal_order_id, paypal_capture_id, error_message, \
     output_key, output_name, created_at, paid_at, processed_at, completed_at";

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, order), fields(
        db.table = "orders",
        db.operation = "insert",
        order_id = %order.id
    ))]
    pub async fn create(&self, order: &NewOrder) -> Result<Order, AppError> {
        let query = format!(
            r#"
            INSERT INTO orders (
                id, service_id, service_name, service_type, unit, base_price_cents,
                file_id, file_name, customer_name, customer_email, quantity,
                amount_cents, status, extra_fields, included_services
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending', $13, $14)
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Order>(&query)
            .bind(order.id)
            .bind(&order.service_id)
            .bind(&order.service_name)
            .bind(&order.service_type)
            .bind(&order.unit)
            .bind(order.base_price_cents)
            .bind(order.file_id)
            .bind(&order.file_name)
            .bind(&order.customer_name)
            .bind(&order.customer_email)
            .bind(order.quantity)
            .bind(order.amount_cents)
            .bind(&order.extra_fields)
            .bind(&order.included_services)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn get(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    /// Fetch an order or return `NotFound`.
    pub async fn get_required(&self, order_id: Uuid) -> Result<Order, AppError> {
        self.get(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn set_paypal_order(
        &self,
        order_id: Uuid,
        paypal_order_id: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE orders SET paypal_order_id = $2 WHERE id = $1 AND status = 'pending'",
        )
        .bind(order_id)
        .bind(paypal_order_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(self.transition_conflict(order_id, "create a payment").await);
        }
        Ok(())
    }

    /// Transition pending -> paid. A repeated capture finds no pending row
    /// and surfaces the current status instead of re-marking the order.
    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn mark_paid(&self, order_id: Uuid, capture_id: &str) -> Result<Order, AppError> {
        let query = format!(
            r#"
            UPDATE orders
            SET status = 'paid', paid_at = $3, paypal_capture_id = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(capture_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.transition_conflict(order_id, "capture payment").await),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn mark_processing(&self, order_id: Uuid) -> Result<Order, AppError> {
        let query = format!(
            r#"
            UPDATE orders
            SET status = 'processing', processed_at = $2, error_message = NULL
            WHERE id = $1 AND status = 'paid'
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.transition_conflict(order_id, "start processing").await),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn complete(
        &self,
        order_id: Uuid,
        output_key: &str,
        output_name: &str,
    ) -> Result<Order, AppError> {
        let query = format!(
            r#"
            UPDATE orders
            SET status = 'completed', completed_at = $4, output_key = $2, output_name = $3
            WHERE id = $1 AND status = 'processing'
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(output_key)
            .bind(output_name)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.transition_conflict(order_id, "complete").await),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn fail(&self, order_id: Uuid, message: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'failed', error_message = $2
            WHERE id = $1 AND status IN ('paid', 'processing')
            "#,
        )
        .bind(order_id)
        .bind(message)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(self.transition_conflict(order_id, "mark failed").await);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn refund(&self, order_id: Uuid) -> Result<Order, AppError> {
        let query = format!(
            r#"
            UPDATE orders
            SET status = 'refunded'
            WHERE id = $1 AND status IN ('paid', 'completed')
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.transition_conflict(order_id, "refund").await),
        }
    }

    /// Admin reprocess: rewind a completed or failed order to paid so the
    /// pipeline can run again. Previous output references are cleared.
    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "update"))]
    pub async fn reset_to_paid(&self, order_id: Uuid) -> Result<Order, AppError> {
        let query = format!(
            r#"
            UPDATE orders
            SET status = 'paid', error_message = NULL, output_key = NULL, output_name = NULL,
                completed_at = NULL
            WHERE id = $1 AND status IN ('completed', 'failed')
            RETURNING {ORDER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        match updated {
            Some(order) => Ok(order),
            None => Err(self.transition_conflict(order_id, "reprocess").await),
        }
    }

    /// Paginated order listing for the admin dashboard, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderSummary>, i64), AppError> {
        let (rows, total) = match status {
            Some(status) => {
                let rows = sqlx::query_as::<_, OrderSummary>(
                    r#"
                    SELECT id, service_id, service_name, customer_email, amount_cents, status, created_at
                    FROM orders
                    WHERE status = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::from)?;
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = $1")
                        .bind(status)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(AppError::from)?;
                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, OrderSummary>(
                    r#"
                    SELECT id, service_id, service_name, customer_email, amount_cents, status, created_at
                    FROM orders
                    ORDER BY created_at DESC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::from)?;
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await
                    .map_err(AppError::from)?;
                (rows, total)
            }
        };

        Ok((rows, total))
    }

    /// Build the conflict error for a rejected transition, naming the
    /// order's actual current status.
    async fn transition_conflict(&self, order_id: Uuid, action: &str) -> AppError {
        match self.get(order_id).await {
            Ok(Some(order)) => AppError::InvalidOrderStatus {
                current: order.status.to_string(),
                action: action.to_string(),
            },
            Ok(None) => AppError::NotFound(format!("Order {} not found", order_id)),
            Err(e) => e,
        }
    }
}
