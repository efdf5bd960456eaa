//! Domain models shared across Paperdesk components.

pub mod admin;
pub mod analytics;
pub mod file;
pub mod order;
pub mod service;

pub use admin::AdminUser;
pub use analytics::{AnalyticsEvent, AnalyticsSummary, DailyRevenue, ServiceBreakdown};
pub use file::{UploadResponse, UploadedFile};
pub use order::{NewOrder, Order, OrderResponse, OrderStatus, OrderSummary};
pub use service::{
    cents_to_decimal, PricingUnit, Service, ServiceKind, ServiceResponse, ServiceType,
};
