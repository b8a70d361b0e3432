//! Database repository for contact/adoption form submissions.

use crate::api::models::form_submissions::SubmissionStatus;
use crate::db::{
    errors::Result,
    models::form_submissions::{FormSubmission, SubmissionCreateDBRequest},
};
use crate::types::{abbrev_uuid, SubmissionId};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing form submissions
#[derive(Debug, Clone)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    pub form_type: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for SubmissionFilter {
    fn default() -> Self {
        Self {
            status: None,
            form_type: None,
            skip: 0,
            limit: 100,
        }
    }
}

/// Submissions are created by the public site and triaged by staff, so this
/// repository exposes create/list/status-update rather than full CRUD.
pub struct FormSubmissions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> FormSubmissions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(form_type = %request.form_type), err)]
    pub async fn create(&mut self, request: &SubmissionCreateDBRequest) -> Result<FormSubmission> {
        let submission = sqlx::query_as::<_, FormSubmission>(
            r#"
            INSERT INTO form_submissions (form_type, name, email, phone, message, puppy_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.form_type)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.message)
        .bind(request.puppy_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(submission)
    }

    #[instrument(skip(self), fields(submission_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: SubmissionId) -> Result<Option<FormSubmission>> {
        let submission = sqlx::query_as::<_, FormSubmission>("SELECT * FROM form_submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(submission)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &SubmissionFilter) -> Result<Vec<FormSubmission>> {
        let submissions = sqlx::query_as::<_, FormSubmission>(
            r#"
            SELECT * FROM form_submissions
            WHERE ($1::submission_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR form_type = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.status)
        .bind(&filter.form_type)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(submissions)
    }

    #[instrument(skip(self), fields(submission_id = %abbrev_uuid(&id)), err)]
    pub async fn update_status(&mut self, id: SubmissionId, status: SubmissionStatus) -> Result<Option<FormSubmission>> {
        let submission = sqlx::query_as::<_, FormSubmission>(
            r#"
            UPDATE form_submissions
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(submission)
    }

    #[instrument(skip(self), fields(submission_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: SubmissionId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
