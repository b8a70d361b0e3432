//! Database models for contact/adoption form submissions.

use crate::api::models::form_submissions::SubmissionStatus;
use crate::types::{PuppyId, SubmissionId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for a form submission row
#[derive(Debug, Clone, FromRow)]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub form_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub puppy_id: Option<PuppyId>,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a form submission
#[derive(Debug, Clone)]
pub struct SubmissionCreateDBRequest {
    pub form_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub puppy_id: Option<PuppyId>,
}
