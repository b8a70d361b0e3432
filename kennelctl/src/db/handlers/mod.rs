//! Repository implementations for database access.
//!
//! This module provides repository structs for each major entity in the system.
//! Repositories follow a consistent pattern and implement the [`Repository`] trait
//! where full CRUD applies; tables with narrower access patterns (integrations,
//! payment sessions, chat, audit log) expose purpose-built methods instead.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//! - Uses the connection's transaction for ACID guarantees
//!
//! # Common Pattern
//!
//! ```ignore
//! use kennelctl::db::handlers::{Puppies, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     // Start a transaction
//!     let mut tx = pool.begin().await?;
//!
//!     // Create repository from transaction
//!     let mut repo = Puppies::new(&mut tx);
//!
//!     // Perform operations
//!     let puppies = repo.list(&Default::default()).await?;
//!
//!     // Commit or rollback
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod change_logs;
pub mod chat;
pub mod form_submissions;
pub mod integrations;
pub mod litters;
pub mod payment_sessions;
pub mod posts;
pub mod puppies;
pub mod repository;
pub mod site;
pub mod testimonials;
pub mod users;

pub use change_logs::ChangeLogs;
pub use chat::Chat;
pub use form_submissions::FormSubmissions;
pub use integrations::Integrations;
pub use litters::Litters;
pub use payment_sessions::PaymentSessions;
pub use posts::Posts;
pub use puppies::Puppies;
pub use repository::Repository;
pub use site::Site;
pub use testimonials::Testimonials;
pub use users::Users;
