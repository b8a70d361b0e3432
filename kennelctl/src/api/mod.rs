//! HTTP API layer.
//!
//! Split into [`models`] (request/response DTOs, the public API contract) and
//! [`handlers`] (axum handler functions). Handlers authenticate via the
//! session cookie extractor, authorize with role checks, and delegate data
//! access to the repositories in [`crate::db::handlers`].

pub mod handlers;
pub mod models;
