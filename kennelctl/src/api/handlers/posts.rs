//! Handlers for blog posts.
//!
//! The public storefront sees only PUBLISHED posts, addressed by slug; the
//! admin API has full CRUD over drafts and published posts alike.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        posts::{ListPostsQuery, PostCreate, PostResponse, PostStatus, PostUpdate},
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::handlers::{posts::PostFilter, Posts, Repository},
    errors::Error,
    types::{Operation, PostId, Resource},
    AppState,
};

fn post_not_found(id: impl ToString) -> Error {
    Error::NotFound {
        resource: "Blog post".to_string(),
        id: id.to_string(),
    }
}

/// Public listing: published posts only.
#[tracing::instrument(skip_all)]
pub async fn list_published_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, Error> {
    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let posts = Posts::new(&mut conn)
        .list(&PostFilter {
            status: Some(PostStatus::Published),
            category: query.category,
            skip,
            limit,
        })
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Public fetch by slug; drafts are invisible here.
#[tracing::instrument(skip_all)]
pub async fn get_post_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<PostResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let post = Posts::new(&mut conn)
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| post_not_found(&slug))?;

    Ok(Json(PostResponse::from(post)))
}

/// Admin listing across all statuses.
#[tracing::instrument(skip_all)]
pub async fn list_posts(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, Error> {
    require_staff(&user, Operation::Read, Resource::BlogPosts)?;

    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let posts = Posts::new(&mut conn)
        .list(&PostFilter {
            status: query.status,
            category: query.category,
            skip,
            limit,
        })
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_post(State(state): State<AppState>, user: CurrentUser, Path(id): Path<PostId>) -> Result<Json<PostResponse>, Error> {
    require_staff(&user, Operation::Read, Resource::BlogPosts)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let post = Posts::new(&mut conn).get_by_id(id).await?.ok_or_else(|| post_not_found(id))?;

    Ok(Json(PostResponse::from(post)))
}

#[tracing::instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<PostCreate>,
) -> Result<(StatusCode, Json<PostResponse>), Error> {
    require_staff(&user, Operation::Create, Resource::BlogPosts)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let created = Posts::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(created))))
}

#[tracing::instrument(skip_all)]
pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<PostId>,
    Json(request): Json<PostUpdate>,
) -> Result<Json<PostResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::BlogPosts)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Posts::new(&mut conn);

    if repo.get_by_id(id).await?.is_none() {
        return Err(post_not_found(id));
    }

    let updated = repo.update(id, &request.into()).await?;
    Ok(Json(PostResponse::from(updated)))
}

#[tracing::instrument(skip_all)]
pub async fn delete_post(State(state): State<AppState>, user: CurrentUser, Path(id): Path<PostId>) -> Result<StatusCode, Error> {
    require_staff(&user, Operation::Delete, Resource::BlogPosts)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !Posts::new(&mut conn).delete(id).await? {
        return Err(post_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
