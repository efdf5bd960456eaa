//! Application initialization

pub mod database;
pub mod routes;
pub mod server;

use anyhow::{Context, Result};
use axum::Router;
use paperdesk_core::{Catalog, Config};
use paperdesk_db::{AdminRepository, AnalyticsRepository, FileRepository, OrderRepository};
use paperdesk_storage::LocalStorage;
use std::sync::Arc;

use crate::services::email::EmailService;
use crate::services::paypal::PayPalClient;
use crate::state::AppState;

/// Build the application state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let pool = database::setup_database(&config).await?;

    let catalog = Arc::new(Catalog::builtin().context("Invalid service catalog")?);
    tracing::info!(services = catalog.len(), "Service catalog loaded");

    let storage = LocalStorage::new(
        config.storage_path(),
        config.storage_base_url().to_string(),
    )
    .await
    .context("Failed to initialize storage")?;

    let paypal = PayPalClient::from_config(&config);
    if paypal.is_none() {
        tracing::warn!("PayPal credentials not configured, payment endpoints will be unavailable");
    }
    let email = EmailService::from_config(&config);

    let state = Arc::new(AppState {
        pool: pool.clone(),
        catalog,
        storage: Arc::new(storage),
        orders: OrderRepository::new(pool.clone()),
        files: FileRepository::new(pool.clone()),
        admins: AdminRepository::new(pool.clone()),
        analytics: AnalyticsRepository::new(pool),
        paypal,
        email,
        is_production: config.is_production(),
        config,
    });

    bootstrap_admin(&state).await?;

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}

/// Create the bootstrap admin account from ADMIN_EMAIL / ADMIN_PASSWORD
/// if it does not exist yet.
async fn bootstrap_admin(state: &Arc<AppState>) -> Result<()> {
    let Some(password) = state.config.admin_password() else {
        tracing::debug!("ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(());
    };

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .context("Failed to hash bootstrap admin password")?;
    let created = state
        .admins
        .create_if_absent(state.config.admin_email(), &hash)
        .await
        .context("Failed to bootstrap admin account")?;

    if created {
        tracing::info!(email = %state.config.admin_email(), "Bootstrap admin account created");
    }
    Ok(())
}
