//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request deserialization
//! and response serialization. These models define the public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from database models,
//!   allowing independent evolution of API and storage representations
//! - **Validation**: Models use serde for deserialization and validation
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API docs
//!
//! # Model Categories
//!
//! ## Catalog and Content
//!
//! - [`puppies`]: Puppy listings and admin create/update requests
//! - [`litters`]: Litter records
//! - [`posts`]: Blog posts
//! - [`testimonials`]: Customer testimonials
//! - [`form_submissions`]: Contact and adoption inquiry forms
//! - [`site`]: SEO metadata and PWA manifest settings
//!
//! ## Payments and Integrations
//!
//! - [`integrations`]: Encrypted third-party credential management
//!   (credentials are never returned, only an `api_key_set` flag)
//! - [`payments`]: Checkout, invoice, and payment session payloads
//! - [`change_logs`]: Audit trail entries for sensitive admin actions
//!
//! ## Accounts
//!
//! - [`users`]: User profiles and roles
//! - [`auth`]: Login and registration payloads
//! - [`chat`]: Support conversation and message payloads

pub mod auth;
pub mod change_logs;
pub mod chat;
pub mod form_submissions;
pub mod integrations;
pub mod litters;
pub mod pagination;
pub mod payments;
pub mod posts;
pub mod puppies;
pub mod site;
pub mod testimonials;
pub mod users;
