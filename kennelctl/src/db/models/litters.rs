//! Database models for litters.

use crate::api::models::litters::LitterStatus;
use crate::types::LitterId;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database entity for a litter row
#[derive(Debug, Clone, FromRow)]
pub struct Litter {
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

/// Database request for creating a litter
#[derive(Debug, Clone)]
pub struct LitterCreateDBRequest {
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
}

/// Database request for updating a litter. None fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LitterUpdateDBRequest {
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
