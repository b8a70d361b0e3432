//! API response models for the audit trail.

use super::pagination::Pagination;
use crate::db::models::change_logs::ChangeLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChangeLogResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub action: String,
    pub context: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub actor_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<ChangeLog> for ChangeLogResponse {
    fn from(db: ChangeLog) -> Self {
        Self {
            id: db.id,
            action: db.action,
            context: db.context,
            actor_id: db.actor_id,
            details: db.details,
            created_at: db.created_at,
        }
    }
}

/// Query parameters for listing audit entries
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListChangeLogsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}
