//! Paperdesk Storage Library
//!
//! Storage abstraction for customer uploads and processed artifacts.
//! Provides the `Storage` trait, the local filesystem backend, and
//! storage-key helpers.

pub mod keys;
pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
