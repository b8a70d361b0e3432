//! Database repository for the audit trail.

use crate::db::{
    errors::Result,
    models::change_logs::{ChangeLog, ChangeLogCreateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct ChangeLogs<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ChangeLogs<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(action = %request.action), err)]
    pub async fn create(&mut self, request: &ChangeLogCreateDBRequest) -> Result<ChangeLog> {
        let entry = sqlx::query_as::<_, ChangeLog>(
            r#"
            INSERT INTO change_logs (action, context, actor_id, details)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&request.action)
        .bind(&request.context)
        .bind(request.actor_id)
        .bind(&request.details)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(entry)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self, limit: i64, skip: i64) -> Result<Vec<ChangeLog>> {
        let entries = sqlx::query_as::<_, ChangeLog>("SELECT * FROM change_logs ORDER BY created_at DESC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(entries)
    }
}
