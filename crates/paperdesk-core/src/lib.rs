//! Paperdesk Core Library
//!
//! This crate provides the domain models, service catalog, pricing engine,
//! error types, and configuration shared across all Paperdesk components.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogFilter};
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    Order, OrderStatus, PricingUnit, Service, ServiceKind, ServiceType, UploadedFile,
};
pub use pricing::price_cents;
