//! Database models for the audit trail.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for an audit log row
#[derive(Debug, Clone, FromRow)]
pub struct ChangeLog {
    pub id: Uuid,
    pub action: String,
    pub context: Option<String>,
    pub actor_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Database request for recording an audit entry
#[derive(Debug, Clone)]
pub struct ChangeLogCreateDBRequest {
    pub action: String,
    pub context: Option<String>,
    pub actor_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
}
