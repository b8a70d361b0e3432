//! Handlers for customer support chat.
//!
//! Customers each get one open conversation with the kennel; staff see every
//! conversation in an inbox. Message delivery is plain polling with an
//! `after` cursor plus a presence heartbeat for typing indicators.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use sqlx::PgConnection;

use crate::{
    api::models::{
        chat::{
            ConversationResponse, ConversationStatusUpdate, ListConversationsQuery, ListMessagesQuery, MessageCreate,
            MessageResponse, PresenceResponse, PresenceUpdate,
        },
        users::CurrentUser,
    },
    auth::permissions::require_staff,
    db::{handlers::Chat, models::chat::Conversation},
    errors::Error,
    types::{ConversationId, Operation, Resource},
    AppState,
};

/// How recently a participant must have checked in to count as present.
const PRESENCE_WINDOW_SECS: i64 = 30;

fn conversation_not_found(id: ConversationId) -> Error {
    Error::NotFound {
        resource: "Conversation".to_string(),
        id: id.to_string(),
    }
}

/// Fetch a conversation the user is allowed to see: their own, or any if
/// they are staff.
async fn load_conversation(
    conn: &mut PgConnection,
    user: &CurrentUser,
    id: ConversationId,
    operation: Operation,
) -> Result<Conversation, Error> {
    let conversation = Chat::new(conn)
        .get_conversation(id)
        .await?
        .ok_or_else(|| conversation_not_found(id))?;

    if conversation.user_id != user.id {
        require_staff(user, operation, Resource::Conversations)?;
    }

    Ok(conversation)
}

/// The customer's own conversation, created on first access.
#[tracing::instrument(skip_all)]
pub async fn get_my_conversation(State(state): State<AppState>, user: CurrentUser) -> Result<Json<ConversationResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let conversation = Chat::new(&mut conn).get_or_create_conversation(user.id).await?;

    Ok(Json(ConversationResponse::from(conversation)))
}

/// Staff inbox of all conversations.
#[tracing::instrument(skip_all)]
pub async fn list_conversations(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListConversationsQuery>,
) -> Result<Json<Vec<ConversationResponse>>, Error> {
    require_staff(&user, Operation::Read, Resource::Conversations)?;

    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let conversations = Chat::new(&mut conn).list_conversations(query.status, limit, skip).await?;

    Ok(Json(conversations.into_iter().map(ConversationResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn set_conversation_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ConversationId>,
    Json(request): Json<ConversationStatusUpdate>,
) -> Result<Json<ConversationResponse>, Error> {
    require_staff(&user, Operation::Update, Resource::Conversations)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let conversation = Chat::new(&mut conn)
        .set_conversation_status(id, request.status)
        .await?
        .ok_or_else(|| conversation_not_found(id))?;

    Ok(Json(ConversationResponse::from(conversation)))
}

#[tracing::instrument(skip_all)]
pub async fn post_message(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ConversationId>,
    Json(request): Json<MessageCreate>,
) -> Result<(StatusCode, Json<MessageResponse>), Error> {
    if request.body.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Message body cannot be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    load_conversation(&mut conn, &user, id, Operation::Update).await?;

    let message = Chat::new(&mut conn).add_message(id, user.id, request.body.trim()).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// Poll messages; fetching also marks the other side's messages as read.
#[tracing::instrument(skip_all)]
pub async fn list_messages(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ConversationId>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<MessageResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    load_conversation(&mut conn, &user, id, Operation::Read).await?;

    let mut chat = Chat::new(&mut conn);
    chat.mark_read(id, user.id).await?;
    let messages = chat.list_messages(id, query.after).await?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Presence heartbeat; also carries the typing indicator.
#[tracing::instrument(skip_all)]
pub async fn update_presence(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ConversationId>,
    Json(request): Json<PresenceUpdate>,
) -> Result<Json<PresenceResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    load_conversation(&mut conn, &user, id, Operation::Update).await?;

    let presence = Chat::new(&mut conn).touch_presence(id, user.id, request.is_typing).await?;

    Ok(Json(PresenceResponse::from(presence)))
}

/// Participants seen within the presence window.
#[tracing::instrument(skip_all)]
pub async fn list_presence(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ConversationId>,
) -> Result<Json<Vec<PresenceResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    load_conversation(&mut conn, &user, id, Operation::Read).await?;

    let seen_since = Utc::now() - Duration::seconds(PRESENCE_WINDOW_SECS);
    let presence = Chat::new(&mut conn).list_presence(id, seen_since).await?;

    Ok(Json(presence.into_iter().map(PresenceResponse::from).collect()))
}
