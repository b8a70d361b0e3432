//! Handlers for contact and adoption inquiry form submissions.
//!
//! Submission is public (no account required); triage is staff-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        form_submissions::{ListSubmissionsQuery, SubmissionCreate, SubmissionResponse, SubmissionStatusUpdate},
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::handlers::{form_submissions::SubmissionFilter, FormSubmissions},
    errors::Error,
    types::{Operation, Resource, SubmissionId},
    AppState,
};

fn submission_not_found(id: SubmissionId) -> Error {
    Error::NotFound {
        resource: "Form submission".to_string(),
        id: id.to_string(),
    }
}

/// Public endpoint: accept a contact or adoption inquiry.
#[tracing::instrument(skip_all, fields(form_type = %request.form_type))]
pub async fn create_submission(
    State(state): State<AppState>,
    Json(request): Json<SubmissionCreate>,
) -> Result<(StatusCode, Json<SubmissionResponse>), Error> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Name and email are required".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let created = FormSubmissions::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(created))))
}

#[tracing::instrument(skip_all)]
pub async fn list_submissions(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<Vec<SubmissionResponse>>, Error> {
    require_staff(&user, Operation::Read, Resource::FormSubmissions)?;

    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let submissions = FormSubmissions::new(&mut conn)
        .list(&SubmissionFilter {
            status: query.status,
            form_type: query.form_type,
            skip,
            limit,
        })
        .await?;

    Ok(Json(submissions.into_iter().map(SubmissionResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_submission(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<SubmissionId>,
) -> Result<Json<SubmissionResponse>, Error> {
    require_staff(&user, Operation::Read, Resource::FormSubmissions)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let submission = FormSubmissions::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;

    Ok(Json(SubmissionResponse::from(submission)))
}

#[tracing::instrument(skip_all)]
pub async fn update_submission_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<SubmissionId>,
    Json(request): Json<SubmissionStatusUpdate>,
) -> Result<Json<SubmissionResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::FormSubmissions)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let updated = FormSubmissions::new(&mut conn)
        .update_status(id, request.status)
        .await?
        .ok_or_else(|| submission_not_found(id))?;

    Ok(Json(SubmissionResponse::from(updated)))
}

#[tracing::instrument(skip_all)]
pub async fn delete_submission(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<SubmissionId>,
) -> Result<StatusCode, Error> {
    require_staff(&user, Operation::Delete, Resource::FormSubmissions)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !FormSubmissions::new(&mut conn).delete(id).await? {
        return Err(submission_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
