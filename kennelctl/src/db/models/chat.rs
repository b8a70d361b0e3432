//! Database models for customer support chat.

use crate::api::models::chat::ConversationStatus;
use crate::types::{ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for a conversation row
#[derive(Debug, Clone, FromRow)]
pub struct Conversation {
    pub id: ConversationId,
    pub user_id: UserId,
    pub status: ConversationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database entity for a message row
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Database entity for a presence row, one per (conversation, user)
#[derive(Debug, Clone, FromRow)]
pub struct ChatPresence {
    pub conversation_id: ConversationId,
    pub user_id: UserId,
    pub is_typing: bool,
    pub last_seen_at: DateTime<Utc>,
}
