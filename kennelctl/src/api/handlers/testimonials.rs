//! Handlers for customer testimonials.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        testimonials::{ListTestimonialsQuery, TestimonialCreate, TestimonialResponse, TestimonialUpdate},
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::handlers::{testimonials::TestimonialFilter, Repository, Testimonials},
    errors::Error,
    types::{Operation, Resource, TestimonialId},
    AppState,
};

fn testimonial_not_found(id: TestimonialId) -> Error {
    Error::NotFound {
        resource: "Testimonial".to_string(),
        id: id.to_string(),
    }
}

#[tracing::instrument(skip_all)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(query): Query<ListTestimonialsQuery>,
) -> Result<Json<Vec<TestimonialResponse>>, Error> {
    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let testimonials = Testimonials::new(&mut conn)
        .list(&TestimonialFilter {
            min_rating: query.min_rating,
            skip,
            limit,
        })
        .await?;

    Ok(Json(testimonials.into_iter().map(TestimonialResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn create_testimonial(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<TestimonialCreate>,
) -> Result<(StatusCode, Json<TestimonialResponse>), Error> {
    require_staff(&user, Operation::Create, Resource::Testimonials)?;

    if !(1..=5).contains(&request.rating) {
        return Err(Error::BadRequest {
            message: "Rating must be between 1 and 5".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let created = Testimonials::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(TestimonialResponse::from(created))))
}

#[tracing::instrument(skip_all)]
pub async fn update_testimonial(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<TestimonialId>,
    Json(request): Json<TestimonialUpdate>,
) -> Result<Json<TestimonialResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::Testimonials)?;

    if let Some(rating) = request.rating {
        if !(1..=5).contains(&rating) {
            return Err(Error::BadRequest {
                message: "Rating must be between 1 and 5".to_string(),
            });
        }
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Testimonials::new(&mut conn);

    if repo.get_by_id(id).await?.is_none() {
        return Err(testimonial_not_found(id));
    }

    let updated = repo.update(id, &request.into()).await?;
    Ok(Json(TestimonialResponse::from(updated)))
}

#[tracing::instrument(skip_all)]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<TestimonialId>,
) -> Result<StatusCode, Error> {
    require_staff(&user, Operation::Delete, Resource::Testimonials)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !Testimonials::new(&mut conn).delete(id).await? {
        return Err(testimonial_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
