//! Authentication and authorization.
//!
//! Browser-based authentication using JWT session cookies:
//! - Users log in via `/authentication/login` with email/password
//! - The signed JWT is stored in a secure, HTTP-only cookie
//! - Tokens expire after `auth.security.jwt_expiry`
//!
//! Authorization is role-based. Each user carries exactly one [`Role`]:
//! admins manage everything, editors manage content, customers access
//! their own dashboard and chat.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for getting the authenticated user in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`permissions`]: Role checks for admin and staff routes
//! - [`session`]: JWT session token creation and verification
//!
//! [`Role`]: crate::api::models::users::Role

pub mod current_user;
pub mod password;
pub mod permissions;
pub mod session;
