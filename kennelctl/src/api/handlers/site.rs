//! Handlers for site-wide settings: per-page SEO metadata and the PWA
//! manifest values.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::models::{
        site::{PwaSettingsResponse, PwaSettingsUpdate, SeoMetaResponse, SeoMetaUpsert},
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::handlers::Site,
    errors::Error,
    types::{Operation, Resource},
    AppState,
};

/// Public: SEO metadata for one page, by slug.
#[tracing::instrument(skip_all)]
pub async fn get_seo_meta(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<SeoMetaResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let meta = Site::new(&mut conn).get_seo_meta(&slug).await?.ok_or_else(|| Error::NotFound {
        resource: "SEO metadata".to_string(),
        id: slug,
    })?;

    Ok(Json(SeoMetaResponse::from(meta)))
}

#[tracing::instrument(skip_all)]
pub async fn list_seo_meta(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<SeoMetaResponse>>, Error> {
    require_staff(&user, Operation::Read, Resource::Site)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let meta = Site::new(&mut conn).list_seo_meta().await?;

    Ok(Json(meta.into_iter().map(SeoMetaResponse::from).collect()))
}

#[tracing::instrument(skip_all, fields(slug = %request.slug))]
pub async fn upsert_seo_meta(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SeoMetaUpsert>,
) -> Result<Json<SeoMetaResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::Site)?;

    if request.slug.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Slug cannot be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let meta = Site::new(&mut conn).upsert_seo_meta(&request.into()).await?;

    Ok(Json(SeoMetaResponse::from(meta)))
}

#[tracing::instrument(skip_all)]
pub async fn delete_seo_meta(State(state): State<AppState>, user: CurrentUser, Path(id): Path<Uuid>) -> Result<StatusCode, Error> {
    require_staff(&user, Operation::Delete, Resource::Site)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !Site::new(&mut conn).delete_seo_meta(id).await? {
        return Err(Error::NotFound {
            resource: "SEO metadata".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Public: PWA manifest values for the storefront.
#[tracing::instrument(skip_all)]
pub async fn get_pwa_settings(State(state): State<AppState>) -> Result<Json<PwaSettingsResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let settings = Site::new(&mut conn).get_pwa_settings().await?;

    Ok(Json(PwaSettingsResponse::from(settings)))
}

#[tracing::instrument(skip_all)]
pub async fn update_pwa_settings(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<PwaSettingsUpdate>,
) -> Result<Json<PwaSettingsResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::Site)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let settings = Site::new(&mut conn).update_pwa_settings(&request.into()).await?;

    Ok(Json(PwaSettingsResponse::from(settings)))
}
