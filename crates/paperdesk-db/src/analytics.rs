//! Analytics repository
//!
//! Milestone events are append-only; aggregates are computed from the
//! orders table so they stay correct even if an event insert was dropped.
//! Revenue counts orders that reached paid, processing, or completed;
//! refunds are excluded.

use paperdesk_core::models::{
    AnalyticsEvent, AnalyticsSummary, DailyRevenue, OrderSummary, ServiceBreakdown,
};
use paperdesk_core::AppError;
use sqlx::PgPool;

const REVENUE_STATUSES: &str = "('paid', 'processing', 'completed')";

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, event), fields(
        db.table = "analytics_events",
        db.operation = "insert",
        event_type = %event.event_type
    ))]
    pub async fn record_event(&self, event: &AnalyticsEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (event_type, order_id, service_id, amount_cents)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&event.event_type)
        .bind(event.order_id)
        .bind(&event.service_id)
        .bind(event.amount_cents)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn summary(&self) -> Result<AnalyticsSummary, AppError> {
        // SUM over BIGINT yields NUMERIC in Postgres, so cast back.
        let total_revenue_cents: i64 = sqlx::query_scalar(&format!(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM orders WHERE status IN {REVENUE_STATUSES}"
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        // Conversion counts any order that reached paid, including refunds.
        let paid_orders: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE status IN ('paid', 'processing', 'completed', 'refunded')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        let by_service = sqlx::query_as::<_, ServiceBreakdown>(&format!(
            r#"
            SELECT service_id, service_name,
                   COUNT(*) AS orders,
                   COALESCE(SUM(amount_cents), 0)::BIGINT AS revenue_cents
            FROM orders
            WHERE status IN {REVENUE_STATUSES}
            GROUP BY service_id, service_name
            ORDER BY revenue_cents DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        let recent_orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT id, service_id, service_name, customer_email, amount_cents, status, created_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(AnalyticsSummary::new(
            total_revenue_cents,
            total_orders,
            paid_orders,
            by_service,
            recent_orders,
        ))
    }

    /// Daily revenue rollup over the trailing `days` window, oldest first.
    /// Days with no revenue are absent from the result.
    #[tracing::instrument(skip(self), fields(db.table = "orders", db.operation = "select"))]
    pub async fn daily_revenue(&self, days: i64) -> Result<Vec<DailyRevenue>, AppError> {
        sqlx::query_as::<_, DailyRevenue>(&format!(
            r#"
            SELECT created_at::date AS day,
                   COUNT(*) AS orders,
                   COALESCE(SUM(amount_cents), 0)::BIGINT AS revenue_cents
            FROM orders
            WHERE status IN {REVENUE_STATUSES}
              AND created_at >= NOW() - make_interval(days => $1::INT)
            GROUP BY created_at::date
            ORDER BY day ASC
            "#
        ))
        .bind(days)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
