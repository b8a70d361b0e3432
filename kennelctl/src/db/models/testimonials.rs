//! Database models for testimonials.

use crate::types::TestimonialId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for a testimonial row
#[derive(Debug, Clone, FromRow)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub location: Option<String>,
    pub testimonial_text: String,
    pub rating: i32,
    pub puppy_name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database request for creating a testimonial
#[derive(Debug, Clone)]
pub struct TestimonialCreateDBRequest {
    pub name: String,
    pub location: Option<String>,
    pub testimonial_text: String,
    pub rating: i32,
    pub puppy_name: Option<String>,
    pub image_url: Option<String>,
}

/// Database request for updating a testimonial. None fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TestimonialUpdateDBRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub testimonial_text: Option<String>,
    pub rating: Option<i32>,
    pub puppy_name: Option<String>,
    pub image_url: Option<String>,
}
