//! Analytics models
//!
//! Append-only events recorded at order milestones, plus the aggregate
//! shapes served by the admin dashboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::order::OrderSummary;
use super::service::cents_to_decimal;

/// An analytics event to record. Event types: "order_created",
/// "payment_completed", "order_completed", "order_failed", "order_refunded".
#[derive(Debug, Clone)]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub order_id: Uuid,
    pub service_id: String,
    pub amount_cents: i64,
}

/// Per-service order and revenue breakdown
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ServiceBreakdown {
    pub service_id: String,
    pub service_name: String,
    pub orders: i64,
    pub revenue_cents: i64,
}

/// Revenue rollup for a single day
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailyRevenue {
    pub day: NaiveDate,
    pub orders: i64,
    pub revenue_cents: i64,
}

/// Dashboard analytics aggregate
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsSummary {
    /// Revenue in major units across paid and completed orders
    pub total_revenue: Decimal,
    pub total_revenue_cents: i64,
    pub total_orders: i64,
    /// Fraction of orders that reached paid or beyond, 0.0..=1.0
    pub conversion_rate: f64,
    pub by_service: Vec<ServiceBreakdown>,
    pub recent_orders: Vec<OrderSummary>,
}

impl AnalyticsSummary {
    pub fn new(
        total_revenue_cents: i64,
        total_orders: i64,
        paid_orders: i64,
        by_service: Vec<ServiceBreakdown>,
        recent_orders: Vec<OrderSummary>,
    ) -> Self {
        let conversion_rate = if total_orders > 0 {
            paid_orders as f64 / total_orders as f64
        } else {
            0.0
        };
        AnalyticsSummary {
            total_revenue: cents_to_decimal(total_revenue_cents),
            total_revenue_cents,
            total_orders,
            conversion_rate,
            by_service,
            recent_orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rate_zero_orders() {
        let summary = AnalyticsSummary::new(0, 0, 0, vec![], vec![]);
        assert_eq!(summary.conversion_rate, 0.0);
        assert_eq!(summary.total_revenue.to_string(), "0.00");
    }

    #[test]
    fn test_conversion_rate_fraction() {
        let summary = AnalyticsSummary::new(10_000, 4, 3, vec![], vec![]);
        assert!((summary.conversion_rate - 0.75).abs() < f64::EPSILON);
        assert_eq!(summary.total_revenue.to_string(), "100.00");
    }
}
