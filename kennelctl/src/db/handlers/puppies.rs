//! Database repository for puppies.

use crate::api::models::puppies::PuppyStatus;
use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::puppies::{Puppy, PuppyCreateDBRequest, PuppyUpdateDBRequest},
};
use crate::types::{abbrev_uuid, LitterId, PuppyId, UserId};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing puppies
#[derive(Debug, Clone)]
pub struct PuppyFilter {
    pub status: Option<PuppyStatus>,
    pub litter_id: Option<LitterId>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for PuppyFilter {
    fn default() -> Self {
        Self {
            status: None,
            litter_id: None,
            skip: 0,
            limit: 100,
        }
    }
}

pub struct Puppies<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Puppies<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Mark a puppy as sold to a buyer.
    ///
    /// Used by the payment webhook when a checkout completes. Idempotent:
    /// re-running for an already-sold puppy leaves the original adoption
    /// record intact.
    #[instrument(skip(self), fields(puppy_id = %abbrev_uuid(&id)), err)]
    pub async fn mark_sold(&mut self, id: PuppyId, buyer_id: Option<UserId>) -> Result<Option<Puppy>> {
        let puppy = sqlx::query_as::<_, Puppy>(
            r#"
            UPDATE puppies
            SET status = 'SOLD',
                adopted_by = COALESCE(adopted_by, $2),
                adopted_at = COALESCE(adopted_at, now()),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(buyer_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(puppy)
    }

    /// Mark a puppy as reserved while a checkout is in flight.
    ///
    /// Only transitions from AVAILABLE, so a concurrent checkout on the same
    /// puppy fails cleanly instead of double-reserving.
    #[instrument(skip(self), fields(puppy_id = %abbrev_uuid(&id)), err)]
    pub async fn try_reserve(&mut self, id: PuppyId) -> Result<Option<Puppy>> {
        let puppy = sqlx::query_as::<_, Puppy>(
            r#"
            UPDATE puppies
            SET status = 'RESERVED', updated_at = now()
            WHERE id = $1 AND status = 'AVAILABLE'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(puppy)
    }

    /// Release a reservation back to AVAILABLE (failed or canceled payment).
    #[instrument(skip(self), fields(puppy_id = %abbrev_uuid(&id)), err)]
    pub async fn release_reservation(&mut self, id: PuppyId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE puppies
            SET status = 'AVAILABLE', updated_at = now()
            WHERE id = $1 AND status = 'RESERVED'
            "#,
        )
        .bind(id)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List puppies adopted by a given user.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_adopted_by(&mut self, user_id: UserId) -> Result<Vec<Puppy>> {
        let puppies = sqlx::query_as::<_, Puppy>("SELECT * FROM puppies WHERE adopted_by = $1 ORDER BY adopted_at DESC")
            .bind(user_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(puppies)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Puppies<'c> {
    type CreateRequest = PuppyCreateDBRequest;
    type UpdateRequest = PuppyUpdateDBRequest;
    type Response = Puppy;
    type Id = PuppyId;
    type Filter = PuppyFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let puppy = sqlx::query_as::<_, Puppy>(
            r#"
            INSERT INTO puppies (name, breed, birth_date, price, description, status, photo_url,
                                 gender, color, weight, size, temperament, care_notes, litter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.breed)
        .bind(request.birth_date)
        .bind(request.price)
        .bind(&request.description)
        .bind(request.status)
        .bind(&request.photo_url)
        .bind(&request.gender)
        .bind(&request.color)
        .bind(request.weight)
        .bind(&request.size)
        .bind(&request.temperament)
        .bind(&request.care_notes)
        .bind(request.litter_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(puppy)
    }

    #[instrument(skip(self), fields(puppy_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let puppy = sqlx::query_as::<_, Puppy>("SELECT * FROM puppies WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(puppy)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let puppies = sqlx::query_as::<_, Puppy>(
            r#"
            SELECT * FROM puppies
            WHERE ($1::puppy_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR litter_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.status)
        .bind(filter.litter_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(puppies)
    }

    #[instrument(skip(self), fields(puppy_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM puppies WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(puppy_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let puppy = sqlx::query_as::<_, Puppy>(
            r#"
            UPDATE puppies
            SET name = COALESCE($2, name),
                breed = COALESCE($3, breed),
                birth_date = COALESCE($4, birth_date),
                price = COALESCE($5, price),
                description = COALESCE($6, description),
                status = COALESCE($7, status),
                photo_url = COALESCE($8, photo_url),
                gender = COALESCE($9, gender),
                color = COALESCE($10, color),
                weight = COALESCE($11, weight),
                size = COALESCE($12, size),
                temperament = COALESCE($13, temperament),
                care_notes = COALESCE($14, care_notes),
                litter_id = COALESCE($15, litter_id),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.breed)
        .bind(request.birth_date)
        .bind(request.price)
        .bind(&request.description)
        .bind(request.status)
        .bind(&request.photo_url)
        .bind(&request.gender)
        .bind(&request.color)
        .bind(request.weight)
        .bind(&request.size)
        .bind(&request.temperament)
        .bind(&request.care_notes)
        .bind(request.litter_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(puppy)
    }
}
