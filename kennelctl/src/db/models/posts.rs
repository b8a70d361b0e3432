//! Database models for blog posts.

use crate::api::models::posts::PostStatus;
use crate::types::PostId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for a blog post row
#[derive(Debug, Clone, FromRow)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a blog post
#[derive(Debug, Clone)]
pub struct PostCreateDBRequest {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub status: PostStatus,
}

/// Database request for updating a blog post. None fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostUpdateDBRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub status: Option<PostStatus>,
}
