//! API request/response models for customer support chat.

use crate::db::models::chat::{ChatPresence, Conversation, Message};
use crate::types::{ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Whether a conversation is still accepting messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "conversation_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ConversationStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConversationResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ConversationId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub status: ConversationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationResponse {
    fn from(db: Conversation) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MessageCreate {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: MessageId,
    #[schema(value_type = String, format = "uuid")]
    pub conversation_id: ConversationId,
    #[schema(value_type = String, format = "uuid")]
    pub sender_id: UserId,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(db: Message) -> Self {
        Self {
            id: db.id,
            conversation_id: db.conversation_id,
            sender_id: db.sender_id,
            body: db.body,
            read_at: db.read_at,
            created_at: db.created_at,
        }
    }
}

/// Query parameters for the staff conversation inbox
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListConversationsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: super::pagination::Pagination,

    /// Filter by conversation status
    pub status: Option<ConversationStatus>,
}

/// Query parameters for polling messages in a conversation
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListMessagesQuery {
    /// Only return messages created after this message id
    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub after: Option<MessageId>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PresenceUpdate {
    #[serde(default)]
    pub is_typing: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresenceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub is_typing: bool,
    pub last_seen_at: DateTime<Utc>,
}

impl From<ChatPresence> for PresenceResponse {
    fn from(db: ChatPresence) -> Self {
        Self {
            user_id: db.user_id,
            is_typing: db.is_typing,
            last_seen_at: db.last_seen_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConversationStatusUpdate {
    pub status: ConversationStatus,
}
