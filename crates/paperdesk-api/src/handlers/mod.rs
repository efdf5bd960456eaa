pub mod admin;
pub mod download;
pub mod health;
pub mod orders;
pub mod payments;
pub mod services;
pub mod upload;
