//! Order models
//!
//! An order snapshots the catalog data it was priced against at creation
//! time (name, type, unit, base price). The amount is computed once and
//! never recomputed, so later catalog changes cannot affect existing orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;
use uuid::Uuid;

use super::service::cents_to_decimal;

/// Order lifecycle status.
///
/// Transitions are monotonic:
/// pending -> paid -> processing -> completed | failed,
/// with refunded reachable from paid or completed by admin action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "order_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
            OrderStatus::Refunded => "refunded",
        };
        write!(f, "{}", s)
    }
}

impl OrderStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "processing" => Some(OrderStatus::Processing),
            "completed" => Some(OrderStatus::Completed),
            "failed" => Some(OrderStatus::Failed),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }
}

/// Full order record
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub service_type: String,
    pub unit: String,
    pub base_price_cents: i64,
    pub file_id: Option<Uuid>,
    pub file_name: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub amount_cents: i64,
    pub status: OrderStatus,
    pub extra_fields: serde_json::Value,
    pub included_services: serde_json::Value,
    pub paypal_order_id: Option<String>,
    pub paypal_capture_id: Option<String>,
    pub error_message: Option<String>,
    pub output_key: Option<String>,
    pub output_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Extra-field value by name, if present and a string.
    pub fn extra_field(&self, name: &str) -> Option<&str> {
        self.extra_fields.get(name).and_then(|v| v.as_str())
    }
}

/// Data required to create a new pending order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub service_type: String,
    pub unit: String,
    pub base_price_cents: i64,
    pub file_id: Option<Uuid>,
    pub file_name: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub amount_cents: i64,
    pub extra_fields: serde_json::Value,
    pub included_services: serde_json::Value,
}

/// Compact order row for admin listings and recent-order feeds
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub customer_email: String,
    pub amount_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Order representation in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub service_id: String,
    pub service_name: String,
    pub service_type: String,
    pub quantity: i32,
    /// Total in major units (e.g. 8.97)
    pub amount: Decimal,
    pub amount_cents: i64,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub file_name: Option<String>,
    pub output_name: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            order_id: order.id,
            service_id: order.service_id,
            service_name: order.service_name,
            service_type: order.service_type,
            quantity: order.quantity,
            amount: cents_to_decimal(order.amount_cents),
            amount_cents: order.amount_cents,
            status: order.status,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            file_name: order.file_name,
            output_name: order.output_name,
            error_message: order.error_message,
            created_at: order.created_at,
            paid_at: order.paid_at,
            completed_at: order.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Failed,
            OrderStatus::Refunded,
        ] {
            assert_eq!(OrderStatus::parse(&s.to_string()), Some(s));
        }
        assert_eq!(OrderStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_order_response_amount_is_major_units() {
        let order = Order {
            id: Uuid::new_v4(),
            service_id: "pdf_to_word".to_string(),
            service_name: "PDF to Word Conversion".to_string(),
            service_type: "conversion".to_string(),
            unit: "per_file".to_string(),
            base_price_cents: 299,
            file_id: None,
            file_name: None,
            customer_name: "Sam Doe".to_string(),
            customer_email: "sam@example.com".to_string(),
            quantity: 3,
            amount_cents: 897,
            status: OrderStatus::Pending,
            extra_fields: serde_json::json!({}),
            included_services: serde_json::json!([]),
            paypal_order_id: None,
            paypal_capture_id: None,
            error_message: None,
            output_key: None,
            output_name: None,
            created_at: Utc::now(),
            paid_at: None,
            processed_at: None,
            completed_at: None,
        };
        let response = OrderResponse::from(order);
        assert_eq!(response.amount.to_string(), "8.97");
        assert_eq!(response.amount_cents, 897);
    }
}
