//! API request/response models for encrypted third-party integrations.
//!
//! Stored credentials are never returned through the API. List and upsert
//! responses expose only an `api_key_set` flag indicating whether a usable
//! key is present in the encrypted blob.

use crate::db::models::integrations::Integration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which provider environment the credentials belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "integration_environment", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum IntegrationEnvironment {
    Sandbox,
    Production,
}

impl IntegrationEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationEnvironment::Sandbox => "sandbox",
            IntegrationEnvironment::Production => "production",
        }
    }
}

/// Upsert request, keyed on (service_name, environment).
///
/// `config` holds the credential fields to merge into the stored blob
/// (shallow merge, incoming values win). Sending `api_key` as empty string
/// or null clears the stored key.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IntegrationUpsert {
    pub service_name: String,
    pub environment: IntegrationEnvironment,
    /// Display name; defaults to the service name
    pub name: Option<String>,
    /// Credential fields to merge into the encrypted blob; required
    pub config: serde_json::Value,
    pub is_active: Option<bool>,
    /// Non-secret configuration, stored in the clear
    pub other_config: Option<serde_json::Value>,
}

/// Delete request, keyed the same way as upserts.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IntegrationDelete {
    pub service_name: String,
    pub environment: IntegrationEnvironment,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IntegrationResponse {
    pub service_name: String,
    pub environment: IntegrationEnvironment,
    pub name: String,
    pub is_active: bool,
    /// Whether the encrypted blob contains a non-empty api_key
    pub api_key_set: bool,
    pub other_config: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl IntegrationResponse {
    /// Build a response from a row plus the decrypted credential blob.
    ///
    /// When decryption failed the caller passes `None` and the row is
    /// reported as unusable (inactive, no key) rather than omitted.
    pub fn from_row(row: Integration, decrypted: Option<&serde_json::Value>) -> Self {
        let api_key_set = decrypted
            .and_then(|config| config.get("api_key"))
            .and_then(|key| key.as_str())
            .is_some_and(|key| !key.is_empty());
        let is_active = if decrypted.is_some() { row.is_active } else { false };

        Self {
            service_name: row.service,
            environment: row.environment,
            name: row.name,
            is_active,
            api_key_set,
            other_config: row.other_config,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn row() -> Integration {
        Integration {
            id: Uuid::new_v4(),
            service: "square".to_string(),
            environment: IntegrationEnvironment::Sandbox,
            name: "Square".to_string(),
            data_ciphertext: Some("iv:ct".to_string()),
            is_active: true,
            other_config: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_api_key_set_flag() {
        let with_key = json!({"api_key": "EAAAl123"});
        let response = IntegrationResponse::from_row(row(), Some(&with_key));
        assert!(response.api_key_set);
        assert!(response.is_active);

        let empty_key = json!({"api_key": ""});
        let response = IntegrationResponse::from_row(row(), Some(&empty_key));
        assert!(!response.api_key_set);

        let no_key = json!({"application_id": "sq0idp"});
        let response = IntegrationResponse::from_row(row(), Some(&no_key));
        assert!(!response.api_key_set);
    }

    #[test]
    fn test_undecryptable_row_reported_inactive() {
        let response = IntegrationResponse::from_row(row(), None);
        assert!(!response.is_active);
        assert!(!response.api_key_set);
    }

    #[test]
    fn test_upsert_requires_config() {
        let missing: Result<IntegrationUpsert, _> =
            serde_json::from_str(r#"{"service_name": "square", "environment": "sandbox"}"#);
        assert!(missing.is_err());

        let present: IntegrationUpsert =
            serde_json::from_str(r#"{"service_name": "square", "environment": "sandbox", "config": {"api_key": "k"}}"#)
                .expect("upsert with config should deserialize");
        assert_eq!(present.config, json!({"api_key": "k"}));
    }

    #[test]
    fn test_environment_serialization() {
        assert_eq!(serde_json::to_string(&IntegrationEnvironment::Sandbox).unwrap(), "\"sandbox\"");
        let env: IntegrationEnvironment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, IntegrationEnvironment::Production);
    }
}
