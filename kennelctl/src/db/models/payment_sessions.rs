//! Database models for payment sessions.

use crate::types::{PaymentSessionId, PuppyId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database entity for a payment session row.
///
/// A session is created when a checkout link or invoice is issued, and moves
/// through provider statuses ("pending", "completed", "failed", "canceled")
/// as webhook events arrive.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentSession {
    pub id: PaymentSessionId,
    pub puppy_id: Option<PuppyId>,
    pub user_id: Option<UserId>,
    pub amount: Decimal,
    pub status: String,
    pub payment_provider: String,
    pub session_id: Option<String>,
    pub payment_id: Option<String>,
    pub customer_email: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a payment session
#[derive(Debug, Clone)]
pub struct PaymentSessionCreateDBRequest {
    pub puppy_id: Option<PuppyId>,
    pub user_id: Option<UserId>,
    pub amount: Decimal,
    pub status: String,
    pub payment_provider: String,
    pub session_id: Option<String>,
    pub payment_id: Option<String>,
    pub customer_email: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
