//! Handlers for encrypted third-party integration credentials.
//!
//! Credentials are stored AES-256-GCM encrypted and never leave the server.
//! The upsert path merges incoming credential fields into the stored blob so
//! the dashboard can update a single field (say, the webhook signature key)
//! without re-sending the access token.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::{
    api::models::{
        integrations::{IntegrationDelete, IntegrationResponse, IntegrationUpsert},
        users::CurrentUser,
    },
    auth::permissions::require_admin,
    crypto,
    db::{
        handlers::{ChangeLogs, Integrations},
        models::{change_logs::ChangeLogCreateDBRequest, integrations::IntegrationUpsertDBRequest},
    },
    errors::Error,
    types::{Operation, Resource},
    AppState,
};

/// Create or update the credentials for one (service, environment) pair.
///
/// Incoming `config` fields are shallow-merged over the stored blob, incoming
/// values winning. An `api_key` of empty string or null removes the stored
/// key. If the stored blob cannot be decrypted (key rotation without
/// re-encryption), the merge starts from scratch rather than failing.
#[utoipa::path(
    post,
    path = "/integrations",
    tag = "integrations",
    request_body = IntegrationUpsert,
    responses(
        (status = 200, description = "Integration stored", body = IntegrationResponse),
        (status = 400, description = "config is not a JSON object, or encryption key not configured"),
        (status = 403, description = "Not an admin"),
    )
)]
#[tracing::instrument(skip_all, fields(service = %request.service_name, environment = ?request.environment))]
pub async fn upsert_integration(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<IntegrationUpsert>,
) -> Result<Json<IntegrationResponse>, Error> {
    require_admin(&user, Operation::Update, Resource::Integrations)?;

    if !request.config.is_object() {
        return Err(Error::BadRequest {
            message: "config must be a JSON object".to_string(),
        });
    }

    let key = state.config.require_encryption_key()?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Integrations::new(&mut conn);

    let existing = repo.get_by_service_env(&request.service_name, request.environment).await?;

    // Start the merge from the stored blob when it decrypts, otherwise from
    // an empty object. An undecryptable blob means the encryption key rotated
    // without re-encrypting; the admin is re-entering credentials anyway.
    let stored = match existing.as_ref().and_then(|row| row.data_ciphertext.as_deref()) {
        Some(ciphertext) => match crypto::decrypt_json(ciphertext, key) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    service = %request.service_name,
                    environment = ?request.environment,
                    %error,
                    "Stored integration credentials could not be decrypted; starting fresh"
                );
                json!({})
            }
        },
        None => json!({}),
    };

    let merged = merge_credentials(stored, &request.config);

    let has_credentials = merged.as_object().is_some_and(|obj| !obj.is_empty());
    let data_ciphertext = if has_credentials {
        Some(crypto::encrypt_json(&merged, key).map_err(|e| Error::Other(anyhow::Error::new(e)))?)
    } else {
        None
    };

    let name = request
        .name
        .or_else(|| existing.as_ref().map(|row| row.name.clone()))
        .unwrap_or_else(|| request.service_name.clone());
    let is_active = request
        .is_active
        .or(existing.as_ref().map(|row| row.is_active))
        .unwrap_or(true);
    let other_config = request.other_config.or_else(|| existing.and_then(|row| row.other_config));

    let row = repo
        .upsert(&IntegrationUpsertDBRequest {
            service: request.service_name.clone(),
            environment: request.environment,
            name,
            data_ciphertext,
            is_active,
            other_config,
        })
        .await?;

    let response = IntegrationResponse::from_row(row, Some(&merged));

    // Best effort: a failed audit write should not fail the upsert
    let audit = ChangeLogs::new(&mut conn)
        .create(&ChangeLogCreateDBRequest {
            action: "integration.upsert".to_string(),
            context: Some(request.service_name.clone()),
            actor_id: Some(user.id),
            details: Some(json!({
                "environment": request.environment.as_str(),
                "api_key_set": response.api_key_set,
            })),
        })
        .await;
    if let Err(error) = audit {
        tracing::warn!(service = %request.service_name, %error, "Failed to record integration audit entry");
    }

    Ok(Json(response))
}

/// List all stored integrations with credential presence flags.
///
/// Rows whose blob no longer decrypts are still listed, flagged inactive with
/// no key, so the dashboard shows the operator what needs re-entering.
#[utoipa::path(
    get,
    path = "/integrations",
    tag = "integrations",
    responses(
        (status = 200, description = "List of integrations", body = Vec<IntegrationResponse>),
        (status = 403, description = "Not an admin"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_integrations(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<IntegrationResponse>>, Error> {
    require_admin(&user, Operation::Read, Resource::Integrations)?;

    let key = state.config.encryption_key.as_deref();

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let rows = Integrations::new(&mut conn).list().await?;

    let responses = rows
        .into_iter()
        .map(|row| {
            let decrypted = match (key, row.data_ciphertext.as_deref()) {
                (Some(key), Some(ciphertext)) => match crypto::decrypt_json(ciphertext, key) {
                    Ok(value) => Some(value),
                    Err(error) => {
                        tracing::warn!(service = %row.service, environment = ?row.environment, %error,
                            "Stored integration credentials could not be decrypted");
                        None
                    }
                },
                _ => None,
            };
            IntegrationResponse::from_row(row, decrypted.as_ref())
        })
        .collect();

    Ok(Json(responses))
}

/// Delete an integration, keyed like the upsert.
#[utoipa::path(
    delete,
    path = "/integrations",
    tag = "integrations",
    request_body = IntegrationDelete,
    responses(
        (status = 204, description = "Integration deleted"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Integration not found"),
    )
)]
#[tracing::instrument(skip_all, fields(service = %request.service_name, environment = ?request.environment))]
pub async fn delete_integration(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<IntegrationDelete>,
) -> Result<StatusCode, Error> {
    require_admin(&user, Operation::Delete, Resource::Integrations)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Integrations::new(&mut conn);

    let row = repo
        .get_by_service_env(&request.service_name, request.environment)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Integration".to_string(),
            id: format!("{}/{}", request.service_name, request.environment.as_str()),
        })?;
    repo.delete(row.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Shallow-merge incoming credential fields over the stored blob.
///
/// Incoming values win. A non-object stored blob is treated as empty, a null
/// incoming config merges nothing. An `api_key` that ends up null or empty
/// string is removed from the result.
fn merge_credentials(stored: serde_json::Value, incoming: &serde_json::Value) -> serde_json::Value {
    let mut merged = match stored {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    if let Some(fields) = incoming.as_object() {
        for (field, value) in fields {
            merged.insert(field.clone(), value.clone());
        }
    }

    let clear_api_key = merged
        .get("api_key")
        .is_some_and(|key| key.is_null() || key.as_str().is_some_and(str::is_empty));
    if clear_api_key {
        merged.remove("api_key");
    }

    serde_json::Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_incoming_wins() {
        let stored = json!({"api_key": "old", "location_id": "L1"});
        let incoming = json!({"api_key": "new"});
        let merged = merge_credentials(stored, &incoming);
        assert_eq!(merged, json!({"api_key": "new", "location_id": "L1"}));
    }

    #[test]
    fn test_merge_empty_api_key_removes_stored_key() {
        let stored = json!({"api_key": "old", "location_id": "L1"});
        let merged = merge_credentials(stored, &json!({"api_key": ""}));
        assert_eq!(merged, json!({"location_id": "L1"}));
    }

    #[test]
    fn test_merge_null_api_key_removes_stored_key() {
        let stored = json!({"api_key": "old"});
        let merged = merge_credentials(stored, &json!({"api_key": null}));
        assert_eq!(merged, json!({}));
    }

    #[test]
    fn test_merge_null_config_keeps_stored_fields() {
        let stored = json!({"webhook_signature_key": "whsk"});
        let merged = merge_credentials(stored, &serde_json::Value::Null);
        assert_eq!(merged, json!({"webhook_signature_key": "whsk"}));
    }

    #[test]
    fn test_merge_non_object_stored_blob_starts_empty() {
        let merged = merge_credentials(json!("garbage"), &json!({"api_key": "k"}));
        assert_eq!(merged, json!({"api_key": "k"}));
    }
}
