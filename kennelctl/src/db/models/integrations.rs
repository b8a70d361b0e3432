//! Database models for encrypted third-party integrations.

use crate::api::models::integrations::IntegrationEnvironment;
use crate::types::IntegrationId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for a third-party integration row.
///
/// `data_ciphertext` holds the AES-256-GCM encrypted credential blob in
/// `base64(iv):base64(ciphertext)` form. Plaintext credentials never touch
/// this table.
#[derive(Debug, Clone, FromRow)]
pub struct Integration {
    pub id: IntegrationId,
    pub service: String,
    pub environment: IntegrationEnvironment,
    pub name: String,
    pub data_ciphertext: Option<String>,
    pub is_active: bool,
    pub other_config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for upserting an integration, keyed on (service, environment)
#[derive(Debug, Clone)]
pub struct IntegrationUpsertDBRequest {
    pub service: String,
    pub environment: IntegrationEnvironment,
    pub name: String,
    pub data_ciphertext: Option<String>,
    pub is_active: bool,
    pub other_config: Option<serde_json::Value>,
}
