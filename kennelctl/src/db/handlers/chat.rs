//! Database repository for customer support chat.

use crate::api::models::chat::ConversationStatus;
use crate::db::{
    errors::Result,
    models::chat::{ChatPresence, Conversation, Message},
};
use crate::types::{abbrev_uuid, ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Chat<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Chat<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Get the customer's open conversation, creating one if none exists.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_or_create_conversation(&mut self, user_id: UserId) -> Result<Conversation> {
        if let Some(conversation) =
            sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE user_id = $1 AND status = 'OPEN' LIMIT 1")
                .bind(user_id)
                .fetch_optional(&mut *self.db)
                .await?
        {
            return Ok(conversation);
        }

        let conversation = sqlx::query_as::<_, Conversation>("INSERT INTO conversations (user_id) VALUES ($1) RETURNING *")
            .bind(user_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(conversation)
    }

    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&id)), err)]
    pub async fn get_conversation(&mut self, id: ConversationId) -> Result<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(conversation)
    }

    /// List conversations for the staff inbox, most recently updated first.
    #[instrument(skip(self), err)]
    pub async fn list_conversations(&mut self, status: Option<ConversationStatus>, limit: i64, skip: i64) -> Result<Vec<Conversation>> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT * FROM conversations
            WHERE ($1::conversation_status IS NULL OR status = $1)
            ORDER BY updated_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(conversations)
    }

    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&id)), err)]
    pub async fn set_conversation_status(&mut self, id: ConversationId, status: ConversationStatus) -> Result<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>(
            "UPDATE conversations SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(conversation)
    }

    /// Append a message and bump the conversation's updated_at so it sorts to
    /// the top of the inbox.
    #[instrument(skip(self, body), fields(conversation_id = %abbrev_uuid(&conversation_id)), err)]
    pub async fn add_message(&mut self, conversation_id: ConversationId, sender_id: UserId, body: &str) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            WITH bumped AS (
                UPDATE conversations SET updated_at = now() WHERE id = $1
            )
            INSERT INTO messages (conversation_id, sender_id, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(body)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(message)
    }

    /// List messages in chronological order, optionally only those after a
    /// known message (polling cursor).
    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&conversation_id)), err)]
    pub async fn list_messages(&mut self, conversation_id: ConversationId, after: Option<MessageId>) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE conversation_id = $1
              AND ($2::uuid IS NULL OR created_at > (SELECT created_at FROM messages WHERE id = $2))
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id)
        .bind(after)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(messages)
    }

    /// Mark all messages sent by other participants as read.
    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&conversation_id)), err)]
    pub async fn mark_read(&mut self, conversation_id: ConversationId, reader_id: UserId) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = now()
            WHERE conversation_id = $1 AND sender_id != $2 AND read_at IS NULL
            "#,
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Upsert a presence heartbeat for a participant.
    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&conversation_id)), err)]
    pub async fn touch_presence(&mut self, conversation_id: ConversationId, user_id: UserId, is_typing: bool) -> Result<ChatPresence> {
        let presence = sqlx::query_as::<_, ChatPresence>(
            r#"
            INSERT INTO chat_presence (conversation_id, user_id, is_typing, last_seen_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (conversation_id, user_id)
            DO UPDATE SET is_typing = EXCLUDED.is_typing, last_seen_at = now()
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .bind(is_typing)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(presence)
    }

    /// Presence rows seen since the cutoff, for the polling presence endpoint.
    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&conversation_id)), err)]
    pub async fn list_presence(&mut self, conversation_id: ConversationId, seen_since: DateTime<Utc>) -> Result<Vec<ChatPresence>> {
        let presence = sqlx::query_as::<_, ChatPresence>(
            "SELECT * FROM chat_presence WHERE conversation_id = $1 AND last_seen_at >= $2",
        )
        .bind(conversation_id)
        .bind(seen_since)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(presence)
    }
}
