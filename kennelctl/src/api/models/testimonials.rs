//! API request/response models for testimonials.

use super::pagination::Pagination;
use crate::db::models::testimonials::{Testimonial, TestimonialCreateDBRequest, TestimonialUpdateDBRequest};
use crate::types::TestimonialId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestimonialCreate {
    pub name: String,
    pub location: Option<String>,
    pub testimonial_text: String,
    /// Star rating, 1-5
    #[serde(default = "default_rating")]
    pub rating: i32,
    pub puppy_name: Option<String>,
    pub image_url: Option<String>,
}

fn default_rating() -> i32 {
    5
}

impl From<TestimonialCreate> for TestimonialCreateDBRequest {
    fn from(api: TestimonialCreate) -> Self {
        Self {
            name: api.name,
            location: api.location,
            testimonial_text: api.testimonial_text,
            rating: api.rating,
            puppy_name: api.puppy_name,
            image_url: api.image_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TestimonialUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub testimonial_text: Option<String>,
    pub rating: Option<i32>,
    pub puppy_name: Option<String>,
    pub image_url: Option<String>,
}

impl From<TestimonialUpdate> for TestimonialUpdateDBRequest {
    fn from(api: TestimonialUpdate) -> Self {
        Self {
            name: api.name,
            location: api.location,
            testimonial_text: api.testimonial_text,
            rating: api.rating,
            puppy_name: api.puppy_name,
            image_url: api.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestimonialResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: TestimonialId,
    pub name: String,
    pub location: Option<String>,
    pub testimonial_text: String,
    pub rating: i32,
    pub puppy_name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(db: Testimonial) -> Self {
        Self {
            id: db.id,
            name: db.name,
            location: db.location,
            testimonial_text: db.testimonial_text,
            rating: db.rating,
            puppy_name: db.puppy_name,
            image_url: db.image_url,
            created_at: db.created_at,
        }
    }
}

/// Query parameters for listing testimonials
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListTestimonialsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Only include testimonials with at least this rating
    pub min_rating: Option<i32>,
}
