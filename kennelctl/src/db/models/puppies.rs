//! Database models for puppies.

use crate::api::models::puppies::PuppyStatus;
use crate::types::{LitterId, PuppyId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database entity for a puppy row
#[derive(Debug, Clone, FromRow)]
pub struct Puppy {
    pub id: PuppyId,
    pub name: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub price: Decimal,
    pub description: String,
    pub status: PuppyStatus,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub weight: Option<Decimal>,
    pub size: Option<String>,
    pub temperament: Option<String>,
    pub care_notes: Option<String>,
    pub litter_id: Option<LitterId>,
    pub adopted_by: Option<UserId>,
    pub adopted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a puppy
#[derive(Debug, Clone)]
pub struct PuppyCreateDBRequest {
    pub name: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub price: Decimal,
    pub description: String,
    pub status: PuppyStatus,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub weight: Option<Decimal>,
    pub size: Option<String>,
    pub temperament: Option<String>,
    pub care_notes: Option<String>,
    pub litter_id: Option<LitterId>,
}

/// Database request for updating a puppy. None fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PuppyUpdateDBRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub status: Option<PuppyStatus>,
    pub photo_url: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub weight: Option<Decimal>,
    pub size: Option<String>,
    pub temperament: Option<String>,
    pub care_notes: Option<String>,
    pub litter_id: Option<LitterId>,
}
