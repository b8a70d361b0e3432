//! Handlers for litter records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        litters::{ListLittersQuery, LitterCreate, LitterResponse, LitterUpdate},
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::handlers::{litters::LitterFilter, Litters, Repository},
    errors::Error,
    types::{LitterId, Operation, Resource},
    AppState,
};

fn litter_not_found(id: LitterId) -> Error {
    Error::NotFound {
        resource: "Litter".to_string(),
        id: id.to_string(),
    }
}

#[tracing::instrument(skip_all)]
pub async fn list_litters(
    State(state): State<AppState>,
    Query(query): Query<ListLittersQuery>,
) -> Result<Json<Vec<LitterResponse>>, Error> {
    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let litters = Litters::new(&mut conn)
        .list(&LitterFilter {
            status: query.status,
            skip,
            limit,
        })
        .await?;

    Ok(Json(litters.into_iter().map(LitterResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_litter(State(state): State<AppState>, Path(id): Path<LitterId>) -> Result<Json<LitterResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let litter = Litters::new(&mut conn).get_by_id(id).await?.ok_or_else(|| litter_not_found(id))?;

    Ok(Json(LitterResponse::from(litter)))
}

#[tracing::instrument(skip_all)]
pub async fn create_litter(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<LitterCreate>,
) -> Result<(StatusCode, Json<LitterResponse>), Error> {
    require_staff(&user, Operation::Create, Resource::Litters)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let created = Litters::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(LitterResponse::from(created))))
}

#[tracing::instrument(skip_all)]
pub async fn update_litter(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<LitterId>,
    Json(request): Json<LitterUpdate>,
) -> Result<Json<LitterResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::Litters)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Litters::new(&mut conn);

    if repo.get_by_id(id).await?.is_none() {
        return Err(litter_not_found(id));
    }

    let updated = repo.update(id, &request.into()).await?;
    Ok(Json(LitterResponse::from(updated)))
}

#[tracing::instrument(skip_all)]
pub async fn delete_litter(State(state): State<AppState>, user: CurrentUser, Path(id): Path<LitterId>) -> Result<StatusCode, Error> {
    require_staff(&user, Operation::Delete, Resource::Litters)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !Litters::new(&mut conn).delete(id).await? {
        return Err(litter_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
