//! Application state shared across handlers.

use paperdesk_core::{Catalog, Config};
use paperdesk_db::{AdminRepository, AnalyticsRepository, FileRepository, OrderRepository};
use paperdesk_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::email::EmailService;
use crate::services::paypal::PayPalClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub catalog: Arc<Catalog>,
    pub storage: Arc<dyn Storage>,
    pub orders: OrderRepository,
    pub files: FileRepository,
    pub admins: AdminRepository,
    pub analytics: AnalyticsRepository,
    /// None when PayPal credentials are not configured; payment endpoints
    /// then return a provider error instead of panicking.
    pub paypal: Option<PayPalClient>,
    /// None when email delivery is disabled.
    pub email: Option<EmailService>,
    pub is_production: bool,
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
};
