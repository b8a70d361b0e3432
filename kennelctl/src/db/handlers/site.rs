//! Database repository for site-wide settings (SEO metadata, PWA manifest).

use crate::db::{
    errors::Result,
    models::site::{PwaSettings, PwaSettingsUpdateDBRequest, SeoMeta, SeoMetaUpsertDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Site<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Site<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    pub async fn upsert_seo_meta(&mut self, request: &SeoMetaUpsertDBRequest) -> Result<SeoMeta> {
        let meta = sqlx::query_as::<_, SeoMeta>(
            r#"
            INSERT INTO seo_meta (slug, title, description, keywords, og_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT ON CONSTRAINT seo_meta_slug_unique
            DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                keywords = EXCLUDED.keywords,
                og_image_url = EXCLUDED.og_image_url,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(&request.slug)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.keywords)
        .bind(&request.og_image_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(meta)
    }

    #[instrument(skip(self), err)]
    pub async fn get_seo_meta(&mut self, slug: &str) -> Result<Option<SeoMeta>> {
        let meta = sqlx::query_as::<_, SeoMeta>("SELECT * FROM seo_meta WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(meta)
    }

    #[instrument(skip(self), err)]
    pub async fn list_seo_meta(&mut self) -> Result<Vec<SeoMeta>> {
        let meta = sqlx::query_as::<_, SeoMeta>("SELECT * FROM seo_meta ORDER BY slug")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(meta)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_seo_meta(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM seo_meta WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The pwa_settings table holds exactly one row, seeded by migration.
    #[instrument(skip(self), err)]
    pub async fn get_pwa_settings(&mut self) -> Result<PwaSettings> {
        let settings = sqlx::query_as::<_, PwaSettings>(
            "SELECT app_name, theme_color, background_color, icon_url, updated_at FROM pwa_settings WHERE singleton",
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(settings)
    }

    #[instrument(skip(self, request), err)]
    pub async fn update_pwa_settings(&mut self, request: &PwaSettingsUpdateDBRequest) -> Result<PwaSettings> {
        let settings = sqlx::query_as::<_, PwaSettings>(
            r#"
            UPDATE pwa_settings
            SET app_name = COALESCE($1, app_name),
                theme_color = COALESCE($2, theme_color),
                background_color = COALESCE($3, background_color),
                icon_url = COALESCE($4, icon_url),
                updated_at = now()
            WHERE singleton
            RETURNING app_name, theme_color, background_color, icon_url, updated_at
            "#,
        )
        .bind(&request.app_name)
        .bind(&request.theme_color)
        .bind(&request.background_color)
        .bind(&request.icon_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(settings)
    }
}
