//! API request/response models for litters.

use super::pagination::Pagination;
use crate::db::models::litters::{Litter, LitterCreateDBRequest, LitterUpdateDBRequest};
use crate::types::LitterId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Lifecycle status of a litter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "litter_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LitterStatus {
    Active,
    AvailableSoon,
    AllReserved,
    AllSold,
    Archived,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LitterCreate {
    pub name: String,
    pub breed: String,
    pub mother_name: String,
    pub father_name: String,
    pub birth_date: Option<NaiveDate>,
    pub expected_date: Option<NaiveDate>,
    pub puppy_count: Option<i32>,
    #[serde(default)]
    pub status: Option<LitterStatus>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

impl From<LitterCreate> for LitterCreateDBRequest {
    fn from(api: LitterCreate) -> Self {
        Self {
            name: api.name,
            breed: api.breed,
            mother_name: api.mother_name,
            father_name: api.father_name,
            birth_date: api.birth_date,
            expected_date: api.expected_date,
            puppy_count: api.puppy_count,
            status: api.status.unwrap_or(LitterStatus::Active),
            description: api.description,
            cover_image_url: api.cover_image_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LitterUpdate {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub mother_name: Option<String>,
    pub father_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub expected_date: Option<NaiveDate>,
    pub puppy_count: Option<i32>,
    pub status: Option<LitterStatus>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

impl From<LitterUpdate> for LitterUpdateDBRequest {
    fn from(api: LitterUpdate) -> Self {
        Self {
            name: api.name,
            breed: api.breed,
            mother_name: api.mother_name,
            father_name: api.father_name,
            birth_date: api.birth_date,
            expected_date: api.expected_date,
            puppy_count: api.puppy_count,
            status: api.status,
            description: api.description,
            cover_image_url: api.cover_image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LitterResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: LitterId,
    pub name: String,
    pub breed: String,
    pub mother_name: String,
    pub father_name: String,
    pub birth_date: Option<NaiveDate>,
    pub expected_date: Option<NaiveDate>,
    pub puppy_count: Option<i32>,
    pub status: LitterStatus,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Litter> for LitterResponse {
    fn from(db: Litter) -> Self {
        Self {
            id: db.id,
            name: db.name,
            breed: db.breed,
            mother_name: db.mother_name,
            father_name: db.father_name,
            birth_date: db.birth_date,
            expected_date: db.expected_date,
            puppy_count: db.puppy_count,
            status: db.status,
            description: db.description,
            cover_image_url: db.cover_image_url,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for listing litters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListLittersQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter by lifecycle status
    pub status: Option<LitterStatus>,
}
