//! API request/response models for blog posts.

use super::pagination::Pagination;
use crate::db::models::posts::{BlogPost, PostCreateDBRequest, PostUpdateDBRequest};
use crate::types::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Publication status of a blog post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "post_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PostCreate {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl From<PostCreate> for PostCreateDBRequest {
    fn from(api: PostCreate) -> Self {
        Self {
            title: api.title,
            slug: api.slug,
            excerpt: api.excerpt,
            content: api.content,
            image_url: api.image_url,
            category: api.category,
            author: api.author,
            status: api.status.unwrap_or(PostStatus::Draft),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub status: Option<PostStatus>,
}

impl From<PostUpdate> for PostUpdateDBRequest {
    fn from(api: PostUpdate) -> Self {
        Self {
            title: api.title,
            slug: api.slug,
            excerpt: api.excerpt,
            content: api.content,
            image_url: api.image_url,
            category: api.category,
            author: api.author,
            status: api.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    #[schema(value_type = String, format = "uuid")]
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

impl From<BlogPost> for PostResponse {
    fn from(db: BlogPost) -> Self {
        Self {
            id: db.id,
            title: db.title,
            slug: db.slug,
            excerpt: db.excerpt,
            content: db.content,
            image_url: db.image_url,
            category: db.category,
            author: db.author,
            status: db.status,
            published_at: db.published_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Query parameters for listing blog posts
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListPostsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter by publication status (admin only; public listings are always PUBLISHED)
    pub status: Option<PostStatus>,

    /// Filter by category
    pub category: Option<String>,
}
