//! Database repository for payment sessions.

use crate::db::{
    errors::Result,
    models::payment_sessions::{PaymentSession, PaymentSessionCreateDBRequest},
};
use crate::types::{abbrev_uuid, PaymentSessionId, UserId};
use sqlx::PgConnection;
use tracing::instrument;

pub struct PaymentSessions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> PaymentSessions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(provider = %request.payment_provider), err)]
    pub async fn create(&mut self, request: &PaymentSessionCreateDBRequest) -> Result<PaymentSession> {
        let session = sqlx::query_as::<_, PaymentSession>(
            r#"
            INSERT INTO payment_sessions (puppy_id, user_id, amount, status, payment_provider,
                                          session_id, payment_id, customer_email, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(request.puppy_id)
        .bind(request.user_id)
        .bind(request.amount)
        .bind(&request.status)
        .bind(&request.payment_provider)
        .bind(&request.session_id)
        .bind(&request.payment_id)
        .bind(&request.customer_email)
        .bind(&request.metadata)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(session)
    }

    #[instrument(skip(self), fields(session_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: PaymentSessionId) -> Result<Option<PaymentSession>> {
        let session = sqlx::query_as::<_, PaymentSession>("SELECT * FROM payment_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(session)
    }

    /// Look up a session by the provider's order/session identifier.
    #[instrument(skip(self), err)]
    pub async fn get_by_provider_session(&mut self, provider_session_id: &str) -> Result<Option<PaymentSession>> {
        let session = sqlx::query_as::<_, PaymentSession>("SELECT * FROM payment_sessions WHERE session_id = $1")
            .bind(provider_session_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(session)
    }

    /// Record the provider payment ID and new status for a session, keyed by
    /// the provider order/session identifier.
    #[instrument(skip(self), err)]
    pub async fn update_by_provider_session(
        &mut self,
        provider_session_id: &str,
        payment_id: Option<&str>,
        status: &str,
    ) -> Result<Option<PaymentSession>> {
        let session = sqlx::query_as::<_, PaymentSession>(
            r#"
            UPDATE payment_sessions
            SET payment_id = COALESCE($2, payment_id),
                status = $3,
                updated_at = now()
            WHERE session_id = $1
            RETURNING *
            "#,
        )
        .bind(provider_session_id)
        .bind(payment_id)
        .bind(status)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(session)
    }

    /// Shallow-merge provider event data into the session's metadata blob,
    /// keyed by the provider order/session identifier.
    #[instrument(skip(self, data), err)]
    pub async fn merge_metadata(
        &mut self,
        provider_session_id: &str,
        data: &serde_json::Value,
    ) -> Result<Option<PaymentSession>> {
        let session = sqlx::query_as::<_, PaymentSession>(
            r#"
            UPDATE payment_sessions
            SET metadata = COALESCE(metadata, '{}'::jsonb) || $2,
                updated_at = now()
            WHERE session_id = $1
            RETURNING *
            "#,
        )
        .bind(provider_session_id)
        .bind(data)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(session)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_for_user(&mut self, user_id: UserId) -> Result<Vec<PaymentSession>> {
        let sessions = sqlx::query_as::<_, PaymentSession>("SELECT * FROM payment_sessions WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(sessions)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self, limit: i64, skip: i64) -> Result<Vec<PaymentSession>> {
        let sessions = sqlx::query_as::<_, PaymentSession>("SELECT * FROM payment_sessions ORDER BY created_at DESC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(sessions)
    }
}
