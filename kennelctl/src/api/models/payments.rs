//! API request/response models for checkout, invoices and payment sessions.

use super::pagination::Pagination;
use crate::db::models::payment_sessions::PaymentSession;
use crate::types::{PaymentSessionId, PuppyId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request to create a hosted checkout link for a puppy.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[schema(value_type = String, format = "uuid")]
    pub puppy_id: PuppyId,
    /// Email to prefill on the hosted checkout page
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Hosted payment page to redirect the buyer to
    pub checkout_url: String,
    /// Provider identifier for the payment link / order
    pub session_id: String,
    #[schema(value_type = String, format = "uuid")]
    pub payment_session_id: PaymentSessionId,
}

/// Request to create and send an invoice for a puppy.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InvoiceRequest {
    #[schema(value_type = String, format = "uuid")]
    pub puppy_id: PuppyId,
    pub customer_email: String,
    pub customer_name: Option<String>,
    /// Overrides the puppy's listed price when set
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoiceResponse {
    /// Provider invoice id
    pub invoice_id: String,
    /// Public URL of the published invoice, when the provider returns one
    pub invoice_url: Option<String>,
    #[schema(value_type = String, format = "uuid")]
    pub payment_session_id: PaymentSessionId,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentSessionResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PaymentSessionId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub puppy_id: Option<PuppyId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<UserId>,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub status: String,
    pub payment_provider: String,
    pub session_id: Option<String>,
    pub payment_id: Option<String>,
    pub customer_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentSession> for PaymentSessionResponse {
    fn from(db: PaymentSession) -> Self {
        Self {
            id: db.id,
            puppy_id: db.puppy_id,
            user_id: db.user_id,
            amount: db.amount,
            status: db.status,
            payment_provider: db.payment_provider,
            session_id: db.session_id,
            payment_id: db.payment_id,
            customer_email: db.customer_email,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for listing payment sessions
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListPaymentSessionsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}
