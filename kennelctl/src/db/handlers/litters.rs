//! Database repository for litters.

use crate::api::models::litters::LitterStatus;
use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::litters::{Litter, LitterCreateDBRequest, LitterUpdateDBRequest},
};
use crate::types::{abbrev_uuid, LitterId};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing litters
#[derive(Debug, Clone)]
pub struct LitterFilter {
    pub status: Option<LitterStatus>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for LitterFilter {
    fn default() -> Self {
        Self {
            status: None,
            skip: 0,
            limit: 100,
        }
    }
}

pub struct Litters<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Litters<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Litters<'c> {
    type CreateRequest = LitterCreateDBRequest;
    type UpdateRequest = LitterUpdateDBRequest;
    type Response = Litter;
    type Id = LitterId;
    type Filter = LitterFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let litter = sqlx::query_as::<_, Litter>(
            r#"
            INSERT INTO litters (name, breed, mother_name, father_name, birth_date, expected_date,
                                 puppy_count, status, description, cover_image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.breed)
        .bind(&request.mother_name)
        .bind(&request.father_name)
        .bind(request.birth_date)
        .bind(request.expected_date)
        .bind(request.puppy_count)
        .bind(request.status)
        .bind(&request.description)
        .bind(&request.cover_image_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(litter)
    }

    #[instrument(skip(self), fields(litter_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let litter = sqlx::query_as::<_, Litter>("SELECT * FROM litters WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(litter)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let litters = sqlx::query_as::<_, Litter>(
            r#"
            SELECT * FROM litters
            WHERE ($1::litter_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.status)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(litters)
    }

    #[instrument(skip(self), fields(litter_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM litters WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(litter_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let litter = sqlx::query_as::<_, Litter>(
            r#"
            UPDATE litters
            SET name = COALESCE($2, name),
                breed = COALESCE($3, breed),
                mother_name = COALESCE($4, mother_name),
                father_name = COALESCE($5, father_name),
                birth_date = COALESCE($6, birth_date),
                expected_date = COALESCE($7, expected_date),
                puppy_count = COALESCE($8, puppy_count),
                status = COALESCE($9, status),
                description = COALESCE($10, description),
                cover_image_url = COALESCE($11, cover_image_url),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.breed)
        .bind(&request.mother_name)
        .bind(&request.father_name)
        .bind(request.birth_date)
        .bind(request.expected_date)
        .bind(request.puppy_count)
        .bind(request.status)
        .bind(&request.description)
        .bind(&request.cover_image_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(litter)
    }
}
