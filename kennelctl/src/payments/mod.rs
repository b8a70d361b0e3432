//! Payment provider integration layer.
//!
//! Square is the only provider today. Credentials are never configured
//! statically; they are loaded per-request from the encrypted
//! `third_party_integrations` row and deserialized into [`SquareCredentials`].

use axum::http::StatusCode;
use serde::Deserialize;

pub mod square;

pub use square::SquareProvider;

/// Result type for payment provider operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors that can occur during payment processing
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider not configured")]
    NotConfigured,

    #[error("Invalid payment credentials: {0}")]
    InvalidCredentials(String),

    #[error("Payment provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Payment provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid payment data: {0}")]
    InvalidData(String),

    #[error("Webhook signature verification failed")]
    InvalidSignature,
}

impl From<PaymentError> for StatusCode {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotConfigured | PaymentError::InvalidCredentials(_) | PaymentError::InvalidData(_) => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::InvalidSignature => StatusCode::UNAUTHORIZED,
            PaymentError::Api { .. } | PaymentError::Http(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<PaymentError> for crate::errors::Error {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotConfigured | PaymentError::InvalidCredentials(_) | PaymentError::InvalidData(_) => {
                crate::errors::Error::BadRequest {
                    message: err.to_string(),
                }
            }
            PaymentError::InvalidSignature => crate::errors::Error::Unauthenticated {
                message: Some("Invalid webhook signature".to_string()),
            },
            PaymentError::Api { .. } | PaymentError::Http(_) => crate::errors::Error::Internal {
                operation: err.to_string(),
            },
        }
    }
}

/// Square credentials as stored in the encrypted integration blob.
///
/// All fields are optional at the storage level; [`SquareProvider::new`]
/// rejects blobs missing the fields a given operation needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquareCredentials {
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub webhook_signature_key: Option<String>,
}

impl SquareCredentials {
    /// Deserialize from a decrypted credential blob, ignoring unknown fields.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| PaymentError::InvalidCredentials(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_from_partial_blob() {
        let blob = json!({"access_token": "EAAAl123", "api_key": "legacy", "extra": 1});
        let creds = SquareCredentials::from_json(&blob).unwrap();
        assert_eq!(creds.access_token.as_deref(), Some("EAAAl123"));
        assert!(creds.location_id.is_none());
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(StatusCode::from(PaymentError::NotConfigured), StatusCode::BAD_REQUEST);
        assert_eq!(StatusCode::from(PaymentError::InvalidSignature), StatusCode::UNAUTHORIZED);
        assert_eq!(
            StatusCode::from(PaymentError::Api {
                status: 500,
                message: "boom".to_string()
            }),
            StatusCode::BAD_GATEWAY
        );
    }
}
