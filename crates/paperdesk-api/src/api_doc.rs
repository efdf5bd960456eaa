//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use paperdesk_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paperdesk API",
        version = "0.1.0",
        description = "Document services storefront: catalog, uploads, orders, PayPal payments, background processing, and admin analytics."
    ),
    paths(
        // Catalog
        handlers::services::list_services,
        handlers::services::get_service,
        // Uploads and orders
        handlers::upload::upload_file,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::download::download_result,
        // Payments
        handlers::payments::create_payment,
        handlers::payments::capture_payment,
        // Admin
        handlers::admin::login,
        handlers::admin::analytics,
        handlers::admin::list_orders,
        handlers::admin::get_order,
        handlers::admin::reprocess_order,
        handlers::admin::refund_order,
        handlers::admin::revenue_summary,
        // Health
        handlers::health::health,
    ),
    components(schemas(
        error::ErrorResponse,
        models::ServiceResponse,
        models::ServiceType,
        models::PricingUnit,
        models::OrderStatus,
        models::OrderResponse,
        models::OrderSummary,
        models::UploadResponse,
        models::AnalyticsSummary,
        models::ServiceBreakdown,
        models::DailyRevenue,
        handlers::services::ServiceDetailResponse,
        handlers::orders::CreateOrderRequest,
        handlers::payments::CreatePaymentRequest,
        handlers::payments::CreatePaymentResponse,
        handlers::payments::CapturePaymentRequest,
        handlers::admin::LoginRequest,
        handlers::admin::LoginResponse,
        handlers::admin::OrderListResponse,
        handlers::admin::RevenueSummaryResponse,
    )),
    tags(
        (name = "services", description = "Service catalog"),
        (name = "upload", description = "File uploads"),
        (name = "orders", description = "Orders and results"),
        (name = "payments", description = "PayPal checkout"),
        (name = "admin", description = "Admin dashboard"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;
