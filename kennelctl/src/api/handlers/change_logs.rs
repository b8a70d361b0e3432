//! Handler for the admin audit trail.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    api::models::{
        change_logs::{ChangeLogResponse, ListChangeLogsQuery},
        users::CurrentUser,
    },
    auth::permissions::require_admin,
    db::handlers::ChangeLogs,
    errors::Error,
    types::{Operation, Resource},
    AppState,
};

#[tracing::instrument(skip_all)]
pub async fn list_change_logs(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListChangeLogsQuery>,
) -> Result<Json<Vec<ChangeLogResponse>>, Error> {
    require_admin(&user, Operation::Read, Resource::Integrations)?;

    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let entries = ChangeLogs::new(&mut conn).list(limit, skip).await?;

    Ok(Json(entries.into_iter().map(ChangeLogResponse::from).collect()))
}
