//! Database models for site-wide settings: SEO metadata and PWA manifest.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for a per-page SEO metadata row
#[derive(Debug, Clone, FromRow)]
pub struct SeoMeta {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for upserting SEO metadata, keyed on slug
#[derive(Debug, Clone)]
pub struct SeoMetaUpsertDBRequest {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image_url: Option<String>,
}

/// Database entity for the singleton PWA settings row
#[derive(Debug, Clone, FromRow)]
pub struct PwaSettings {
    pub app_name: String,
    pub theme_color: String,
    pub background_color: String,
    pub icon_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for updating the PWA settings row. None fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PwaSettingsUpdateDBRequest {
    pub app_name: Option<String>,
    pub theme_color: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
}
