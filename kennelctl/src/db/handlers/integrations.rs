//! Database repository for encrypted third-party integrations.

use crate::api::models::integrations::IntegrationEnvironment;
use crate::db::{
    errors::Result,
    models::integrations::{Integration, IntegrationUpsertDBRequest},
};
use crate::types::{abbrev_uuid, IntegrationId};
use sqlx::PgConnection;
use tracing::instrument;

/// Integrations are keyed on (service, environment), so the write path is an
/// upsert rather than separate create/update operations.
pub struct Integrations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Integrations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(service = %request.service, environment = ?request.environment), err)]
    pub async fn upsert(&mut self, request: &IntegrationUpsertDBRequest) -> Result<Integration> {
        let integration = sqlx::query_as::<_, Integration>(
            r#"
            INSERT INTO third_party_integrations (service, environment, name, data_ciphertext, is_active, other_config)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT ON CONSTRAINT third_party_integrations_service_env_unique
            DO UPDATE SET
                name = EXCLUDED.name,
                data_ciphertext = EXCLUDED.data_ciphertext,
                is_active = EXCLUDED.is_active,
                other_config = EXCLUDED.other_config,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(&request.service)
        .bind(request.environment)
        .bind(&request.name)
        .bind(&request.data_ciphertext)
        .bind(request.is_active)
        .bind(&request.other_config)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(integration)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_service_env(&mut self, service: &str, environment: IntegrationEnvironment) -> Result<Option<Integration>> {
        let integration =
            sqlx::query_as::<_, Integration>("SELECT * FROM third_party_integrations WHERE service = $1 AND environment = $2")
                .bind(service)
                .bind(environment)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(integration)
    }

    /// Fetch the active row for a service, regardless of environment.
    ///
    /// At most one environment per service should be active at a time; if
    /// both are, production wins (enum ordering: SANDBOX < PRODUCTION).
    #[instrument(skip(self), err)]
    pub async fn get_active(&mut self, service: &str) -> Result<Option<Integration>> {
        let integration = sqlx::query_as::<_, Integration>(
            r#"
            SELECT * FROM third_party_integrations
            WHERE service = $1 AND is_active = true
            ORDER BY environment DESC
            LIMIT 1
            "#,
        )
        .bind(service)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(integration)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<Integration>> {
        let integrations = sqlx::query_as::<_, Integration>("SELECT * FROM third_party_integrations ORDER BY service, environment")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(integrations)
    }

    #[instrument(skip(self), fields(integration_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: IntegrationId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM third_party_integrations WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
