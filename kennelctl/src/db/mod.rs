//! Database layer: errors, entity models, and table repositories.

pub mod errors;
pub mod handlers;
pub mod models;
