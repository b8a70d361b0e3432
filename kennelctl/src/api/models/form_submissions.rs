//! API request/response models for contact and adoption inquiry forms.

use super::pagination::Pagination;
use crate::db::models::form_submissions::{FormSubmission, SubmissionCreateDBRequest};
use crate::types::{PuppyId, SubmissionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Triage status of a submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "submission_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    New,
    InProgress,
    Resolved,
    Archived,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmissionCreate {
    /// Which form was submitted (e.g. "contact", "adoption")
    pub form_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    /// For adoption inquiries, the puppy being asked about
    #[schema(value_type = Option<String>, format = "uuid")]
    pub puppy_id: Option<PuppyId>,
}

impl From<SubmissionCreate> for SubmissionCreateDBRequest {
    fn from(api: SubmissionCreate) -> Self {
        Self {
            form_type: api.form_type,
            name: api.name,
            email: api.email,
            phone: api.phone,
            message: api.message,
            puppy_id: api.puppy_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmissionStatusUpdate {
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: SubmissionId,
    pub form_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub puppy_id: Option<PuppyId>,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FormSubmission> for SubmissionResponse {
    fn from(db: FormSubmission) -> Self {
        Self {
            id: db.id,
            form_type: db.form_type,
            name: db.name,
            email: db.email,
            phone: db.phone,
            message: db.message,
            puppy_id: db.puppy_id,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for listing submissions
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListSubmissionsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter by triage status
    pub status: Option<SubmissionStatus>,

    /// Filter by form type
    pub form_type: Option<String>,
}
