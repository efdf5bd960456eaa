//! Configuration module
//!
//! Environment-driven application configuration: server, database, storage,
//! authentication, PayPal, and SMTP settings.

use std::env;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_UPLOAD_SIZE_MB: usize = 50;

/// Application configuration loaded from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    environment: String,
    server_port: u16,
    cors_origins: Vec<String>,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    jwt_secret: String,
    jwt_expiry_hours: i64,
    storage_path: String,
    storage_base_url: String,
    max_upload_size_bytes: usize,
    paypal_base_url: String,
    paypal_client_id: Option<String>,
    paypal_client_secret: Option<String>,
    email_enabled: bool,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
    smtp_from: Option<String>,
    smtp_tls: bool,
    frontend_url: Option<String>,
    admin_email: String,
    admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if is_production && jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters in production"
            ));
        }

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            storage_path: env::var("STORAGE_PATH").unwrap_or_else(|_| "./data/files".to_string()),
            storage_base_url: env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/files".to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            paypal_base_url: env::var("PAYPAL_BASE_URL")
                .unwrap_or_else(|_| "https://api-m.sandbox.paypal.com".to_string()),
            paypal_client_id: env::var("PAYPAL_CLIENT_ID").ok().filter(|s| !s.is_empty()),
            paypal_client_secret: env::var("PAYPAL_CLIENT_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            email_enabled: env::var("EMAIL_ENABLED")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            smtp_host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|s| s.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_from: env::var("SMTP_FROM").ok().filter(|s| !s.is_empty()),
            smtp_tls: env::var("SMTP_TLS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            frontend_url: env::var("FRONTEND_URL").ok().filter(|s| !s.is_empty()),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@paperdesk.local".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.jwt_expiry_hours
    }

    pub fn storage_path(&self) -> &str {
        &self.storage_path
    }

    pub fn storage_base_url(&self) -> &str {
        &self.storage_base_url
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn paypal_base_url(&self) -> &str {
        &self.paypal_base_url
    }

    pub fn paypal_client_id(&self) -> Option<&str> {
        self.paypal_client_id.as_deref()
    }

    pub fn paypal_client_secret(&self) -> Option<&str> {
        self.paypal_client_secret.as_deref()
    }

    pub fn email_enabled(&self) -> bool {
        self.email_enabled
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.smtp_tls
    }

    pub fn frontend_url(&self) -> Option<&str> {
        self.frontend_url.as_deref()
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_required_env() {
        env::set_var("ENVIRONMENT", "development");
        env::set_var("DATABASE_URL", "postgresql://localhost/paperdesk_test");
        env::set_var("JWT_SECRET", "test-secret-key-min-32-characters-long");
    }

    #[test]
    fn from_env_uses_defaults() {
        set_required_env();
        env::remove_var("PORT");
        env::remove_var("MAX_UPLOAD_SIZE_MB");
        let config = Config::from_env().expect("config from env");
        assert_eq!(config.server_port(), 4000);
        assert_eq!(config.max_upload_size_bytes(), 50 * 1024 * 1024);
        assert!(!config.is_production());
        assert!(config.paypal_base_url().contains("sandbox"));
    }

    #[test]
    fn email_disabled_by_default() {
        set_required_env();
        env::remove_var("EMAIL_ENABLED");
        let config = Config::from_env().expect("config from env");
        assert!(!config.email_enabled());
    }
}
