//! Paperdesk HTTP API: handlers, auth, payment and email services, and the
//! background processing pipeline.

mod api_doc;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
