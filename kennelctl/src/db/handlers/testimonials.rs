//! Database repository for testimonials.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::testimonials::{Testimonial, TestimonialCreateDBRequest, TestimonialUpdateDBRequest},
};
use crate::types::{abbrev_uuid, TestimonialId};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing testimonials
#[derive(Debug, Clone)]
pub struct TestimonialFilter {
    pub min_rating: Option<i32>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for TestimonialFilter {
    fn default() -> Self {
        Self {
            min_rating: None,
            skip: 0,
            limit: 100,
        }
    }
}

pub struct Testimonials<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Testimonials<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Testimonials<'c> {
    type CreateRequest = TestimonialCreateDBRequest;
    type UpdateRequest = TestimonialUpdateDBRequest;
    type Response = Testimonial;
    type Id = TestimonialId;
    type Filter = TestimonialFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (name, location, testimonial_text, rating, puppy_name, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.location)
        .bind(&request.testimonial_text)
        .bind(request.rating)
        .bind(&request.puppy_name)
        .bind(&request.image_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(testimonial)
    }

    #[instrument(skip(self), fields(testimonial_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let testimonial = sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(testimonial)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT * FROM testimonials
            WHERE ($1::int IS NULL OR rating >= $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.min_rating)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(testimonials)
    }

    #[instrument(skip(self), fields(testimonial_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(testimonial_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                testimonial_text = COALESCE($4, testimonial_text),
                rating = COALESCE($5, rating),
                puppy_name = COALESCE($6, puppy_name),
                image_url = COALESCE($7, image_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.location)
        .bind(&request.testimonial_text)
        .bind(request.rating)
        .bind(&request.puppy_name)
        .bind(&request.image_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(testimonial)
    }
}
