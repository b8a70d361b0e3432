//! API request/response models for puppies.

use super::pagination::Pagination;
use crate::db::models::puppies::{Puppy, PuppyCreateDBRequest, PuppyUpdateDBRequest};
use crate::types::{LitterId, PuppyId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Sale status of a puppy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "puppy_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuppyStatus {
    Available,
    Reserved,
    Sold,
    NotForSale,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PuppyCreate {
    pub name: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    #[schema(value_type = String, example = "2500.00")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<PuppyStatus>,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = Option<String>)]
    pub weight: Option<Decimal>,
    pub size: Option<String>,
    pub temperament: Option<String>,
    pub care_notes: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub litter_id: Option<LitterId>,
}

impl From<PuppyCreate> for PuppyCreateDBRequest {
    fn from(api: PuppyCreate) -> Self {
        Self {
            name: api.name,
            breed: api.breed,
            birth_date: api.birth_date,
            price: api.price,
            description: api.description,
            status: api.status.unwrap_or(PuppyStatus::Available),
            photo_url: api.photo_url,
            gender: api.gender,
            color: api.color,
            weight: api.weight,
            size: api.size,
            temperament: api.temperament,
            care_notes: api.care_notes,
            litter_id: api.litter_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PuppyUpdate {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub status: Option<PuppyStatus>,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = Option<String>)]
    pub weight: Option<Decimal>,
    pub size: Option<String>,
    pub temperament: Option<String>,
    pub care_notes: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub litter_id: Option<LitterId>,
}

impl From<PuppyUpdate> for PuppyUpdateDBRequest {
    fn from(api: PuppyUpdate) -> Self {
        Self {
            name: api.name,
            breed: api.breed,
            birth_date: api.birth_date,
            price: api.price,
            description: api.description,
            status: api.status,
            photo_url: api.photo_url,
            gender: api.gender,
            color: api.color,
            weight: api.weight,
            size: api.size,
            temperament: api.temperament,
            care_notes: api.care_notes,
            litter_id: api.litter_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PuppyResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PuppyId,
    pub name: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub description: String,
    pub status: PuppyStatus,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = Option<String>)]
    pub weight: Option<Decimal>,
    pub size: Option<String>,
    pub temperament: Option<String>,
    pub care_notes: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub litter_id: Option<LitterId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub adopted_by: Option<UserId>,
    pub adopted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Puppy> for PuppyResponse {
    fn from(db: Puppy) -> Self {
        Self {
            id: db.id,
            name: db.name,
            breed: db.breed,
            birth_date: db.birth_date,
            price: db.price,
            description: db.description,
            status: db.status,
            photo_url: db.photo_url,
            gender: db.gender,
            color: db.color,
            weight: db.weight,
            size: db.size,
            temperament: db.temperament,
            care_notes: db.care_notes,
            litter_id: db.litter_id,
            adopted_by: db.adopted_by,
            adopted_at: db.adopted_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for listing puppies
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListPuppiesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter by sale status
    pub status: Option<PuppyStatus>,

    /// Filter by litter
    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub litter_id: Option<LitterId>,
}
