//! Database repository for blog posts.

use crate::api::models::posts::PostStatus;
use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::posts::{BlogPost, PostCreateDBRequest, PostUpdateDBRequest},
};
use crate::types::{abbrev_uuid, PostId};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing blog posts
#[derive(Debug, Clone)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            status: None,
            category: None,
            skip: 0,
            limit: 100,
        }
    }
}

pub struct Posts<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Posts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch a published post by its slug. Drafts are not visible here.
    #[instrument(skip(self), err)]
    pub async fn get_published_by_slug(&mut self, slug: &str) -> Result<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE slug = $1 AND status = 'PUBLISHED'")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(post)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Posts<'c> {
    type CreateRequest = PostCreateDBRequest;
    type UpdateRequest = PostUpdateDBRequest;
    type Response = BlogPost;
    type Id = PostId;
    type Filter = PostFilter;

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        // published_at is stamped on the first transition to PUBLISHED
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (title, slug, excerpt, content, image_url, category, author, status, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    CASE WHEN $8 = 'PUBLISHED'::post_status THEN now() ELSE NULL END)
            RETURNING *
            "#,
        )
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.excerpt)
        .bind(&request.content)
        .bind(&request.image_url)
        .bind(&request.category)
        .bind(&request.author)
        .bind(request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self), fields(post_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let post = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(post)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT * FROM blog_posts
            WHERE ($1::post_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY COALESCE(published_at, created_at) DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.status)
        .bind(&filter.category)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(posts)
    }

    #[instrument(skip(self), fields(post_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(post_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                image_url = COALESCE($6, image_url),
                category = COALESCE($7, category),
                author = COALESCE($8, author),
                status = COALESCE($9, status),
                published_at = CASE
                    WHEN $9 = 'PUBLISHED'::post_status AND published_at IS NULL THEN now()
                    ELSE published_at
                END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.slug)
        .bind(&request.excerpt)
        .bind(&request.content)
        .bind(&request.image_url)
        .bind(&request.category)
        .bind(&request.author)
        .bind(request.status)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(post)
    }
}
