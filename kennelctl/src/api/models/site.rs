//! API request/response models for site-wide settings.

use crate::db::models::site::{
    PwaSettings, PwaSettingsUpdateDBRequest, SeoMeta, SeoMetaUpsertDBRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upsert request for per-page SEO metadata, keyed on the page slug.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SeoMetaUpsert {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image_url: Option<String>,
}

impl From<SeoMetaUpsert> for SeoMetaUpsertDBRequest {
    fn from(api: SeoMetaUpsert) -> Self {
        Self {
            slug: api.slug,
            title: api.title,
            description: api.description,
            keywords: api.keywords,
            og_image_url: api.og_image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeoMetaResponse {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<SeoMeta> for SeoMetaResponse {
    fn from(db: SeoMeta) -> Self {
        Self {
            slug: db.slug,
            title: db.title,
            description: db.description,
            keywords: db.keywords,
            og_image_url: db.og_image_url,
            updated_at: db.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PwaSettingsUpdate {
    pub app_name: Option<String>,
    pub theme_color: Option<String>,
    pub background_color: Option<String>,
    pub icon_url: Option<String>,
}

impl From<PwaSettingsUpdate> for PwaSettingsUpdateDBRequest {
    fn from(api: PwaSettingsUpdate) -> Self {
        Self {
            app_name: api.app_name,
            theme_color: api.theme_color,
            background_color: api.background_color,
            icon_url: api.icon_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PwaSettingsResponse {
    pub app_name: String,
    pub theme_color: String,
    pub background_color: String,
    pub icon_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<PwaSettings> for PwaSettingsResponse {
    fn from(db: PwaSettings) -> Self {
        Self {
            app_name: db.app_name,
            theme_color: db.theme_color,
            background_color: db.background_color,
            icon_url: db.icon_url,
            updated_at: db.updated_at,
        }
    }
}
