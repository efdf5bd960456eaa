//! Paperdesk Database Library
//!
//! sqlx/Postgres repositories for orders, uploaded files, admin users, and
//! analytics. Order status transitions are enforced with conditional
//! updates so concurrent writers cannot skip or rewind the lifecycle.

pub mod admins;
pub mod analytics;
pub mod files;
pub mod orders;

pub use admins::AdminRepository;
pub use analytics::AnalyticsRepository;
pub use files::FileRepository;
pub use orders::OrderRepository;
