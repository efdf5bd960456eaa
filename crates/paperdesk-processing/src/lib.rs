//! Paperdesk Processing Library
//!
//! Pure file-processing operations dispatched by service id. Every
//! operation takes the uploaded bytes plus order context and produces a
//! single `Artifact`; no I/O happens here, storage and database updates are
//! the caller's concern.

pub mod artifact;
pub mod convert;
pub mod dispatch;
pub mod documents;
pub mod error;
pub mod scan;
pub mod text;

pub use artifact::Artifact;
pub use dispatch::{process, ProcessContext};
pub use error::ProcessError;
