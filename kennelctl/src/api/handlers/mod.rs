//! HTTP request handlers.
//!
//! Public storefront endpoints live alongside the authenticated admin API;
//! the router in [`crate::build_router`] decides which handler is mounted
//! where. Handlers return [`crate::errors::Error`], which maps to JSON error
//! responses with appropriate status codes.

pub mod auth;
pub mod change_logs;
pub mod chat;
pub mod form_submissions;
pub mod integrations;
pub mod litters;
pub mod payments;
pub mod posts;
pub mod puppies;
pub mod site;
pub mod testimonials;
pub mod users;
pub mod webhooks;
