//! Handlers for the puppy catalog.
//!
//! Public storefront routes only expose available puppies; the admin routes
//! accept the full filter set and mutate the catalog.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        puppies::{ListPuppiesQuery, PuppyCreate, PuppyResponse, PuppyStatus, PuppyUpdate},
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::handlers::{puppies::PuppyFilter, Puppies, Repository},
    errors::Error,
    types::{Operation, PuppyId, Resource},
    AppState,
};

fn puppy_not_found(id: PuppyId) -> Error {
    Error::NotFound {
        resource: "Puppy".to_string(),
        id: id.to_string(),
    }
}

/// Public listing: only puppies currently for sale.
#[tracing::instrument(skip_all)]
pub async fn list_available_puppies(
    State(state): State<AppState>,
    Query(query): Query<ListPuppiesQuery>,
) -> Result<Json<Vec<PuppyResponse>>, Error> {
    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let puppies = Puppies::new(&mut conn)
        .list(&PuppyFilter {
            status: Some(PuppyStatus::Available),
            litter_id: query.litter_id,
            skip,
            limit,
        })
        .await?;

    Ok(Json(puppies.into_iter().map(PuppyResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_puppy(State(state): State<AppState>, Path(id): Path<PuppyId>) -> Result<Json<PuppyResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let puppy = Puppies::new(&mut conn).get_by_id(id).await?.ok_or_else(|| puppy_not_found(id))?;

    Ok(Json(PuppyResponse::from(puppy)))
}

/// Admin listing with the full filter set (any status).
#[tracing::instrument(skip_all)]
pub async fn list_puppies(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListPuppiesQuery>,
) -> Result<Json<Vec<PuppyResponse>>, Error> {
    require_staff(&user, Operation::Read, Resource::Puppies)?;

    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let puppies = Puppies::new(&mut conn)
        .list(&PuppyFilter {
            status: query.status,
            litter_id: query.litter_id,
            skip,
            limit,
        })
        .await?;

    Ok(Json(puppies.into_iter().map(PuppyResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn create_puppy(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<PuppyCreate>,
) -> Result<(StatusCode, Json<PuppyResponse>), Error> {
    require_staff(&user, Operation::Create, Resource::Puppies)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let created = Puppies::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(PuppyResponse::from(created))))
}

#[tracing::instrument(skip_all)]
pub async fn update_puppy(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<PuppyId>,
    Json(request): Json<PuppyUpdate>,
) -> Result<Json<PuppyResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::Puppies)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Puppies::new(&mut conn);

    if repo.get_by_id(id).await?.is_none() {
        return Err(puppy_not_found(id));
    }

    let updated = repo.update(id, &request.into()).await?;
    Ok(Json(PuppyResponse::from(updated)))
}

#[tracing::instrument(skip_all)]
pub async fn delete_puppy(State(state): State<AppState>, user: CurrentUser, Path(id): Path<PuppyId>) -> Result<StatusCode, Error> {
    require_staff(&user, Operation::Delete, Resource::Puppies)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !Puppies::new(&mut conn).delete(id).await? {
        return Err(puppy_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Puppies adopted by the authenticated customer.
#[tracing::instrument(skip_all)]
pub async fn list_my_adoptions(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<PuppyResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let puppies = Puppies::new(&mut conn).list_adopted_by(user.id).await?;

    Ok(Json(puppies.into_iter().map(PuppyResponse::from).collect()))
}
