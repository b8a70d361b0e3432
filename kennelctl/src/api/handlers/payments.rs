//! Handlers for checkout links, invoices and payment session listings.
//!
//! Square credentials come from the encrypted integration store, never from
//! static configuration, so rotating keys in the dashboard takes effect on
//! the next request.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgConnection;

use crate::{
    api::models::{
        payments::{
            CheckoutRequest, CheckoutResponse, InvoiceRequest, InvoiceResponse, ListPaymentSessionsQuery, PaymentSessionResponse,
        },
        users::CurrentUser,
    },
    auth::permissions::require_admin,
    crypto,
    db::{
        handlers::{Integrations, PaymentSessions, Puppies, Repository},
        models::payment_sessions::PaymentSessionCreateDBRequest,
    },
    errors::Error,
    payments::{square::SquareProvider, SquareCredentials},
    types::{Operation, PaymentSessionId, PuppyId, Resource},
    AppState,
};

/// Release a checkout reservation after a failure, handing the error back.
///
/// Every failure between `try_reserve` and a successful session insert must
/// come through here: the buyer never received a checkout URL, so no webhook
/// will ever fire to free the puppy.
async fn abort_checkout(conn: &mut PgConnection, puppy_id: PuppyId, error: Error) -> Error {
    if let Err(release_error) = Puppies::new(conn).release_reservation(puppy_id).await {
        tracing::warn!(%release_error, "Failed to release reservation after checkout error");
    }
    error
}

/// Build a Square client from the active stored integration.
///
/// Fails with 400 when no active Square integration exists or it has no
/// stored credentials.
pub(crate) async fn square_provider(state: &AppState, conn: &mut PgConnection) -> Result<SquareProvider, Error> {
    let row = Integrations::new(conn)
        .get_active("square")
        .await?
        .ok_or_else(|| Error::BadRequest {
            message: "Square integration is not configured".to_string(),
        })?;

    let ciphertext = row.data_ciphertext.as_deref().ok_or_else(|| Error::BadRequest {
        message: "Square integration has no stored credentials".to_string(),
    })?;

    let key = state.config.require_encryption_key()?;
    let decrypted = crypto::decrypt_json(ciphertext, key).map_err(|e| Error::Other(anyhow::Error::new(e)))?;
    let credentials = SquareCredentials::from_json(&decrypted)?;

    let provider = SquareProvider::new(state.http.clone(), credentials, row.environment, &state.config.square.api_version)?;
    Ok(provider)
}

/// Start a hosted checkout for a puppy.
///
/// Reserves the puppy for the duration of the checkout; the reservation is
/// released if the payment link cannot be created, or later by the webhook
/// when the payment fails.
#[utoipa::path(
    post,
    path = "/store/checkout",
    tag = "payments",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout link created", body = CheckoutResponse),
        (status = 400, description = "Puppy not available or Square not configured"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Puppy not found"),
    )
)]
#[tracing::instrument(skip_all, fields(puppy_id = %crate::types::abbrev_uuid(&request.puppy_id)))]
pub async fn create_checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let puppy = Puppies::new(&mut conn)
        .get_by_id(request.puppy_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Puppy".to_string(),
            id: request.puppy_id.to_string(),
        })?;

    // Resolve the provider before reserving, so a misconfigured integration
    // never leaves puppies stuck in RESERVED
    let provider = square_provider(&state, &mut conn).await?;

    let reserved = Puppies::new(&mut conn).try_reserve(request.puppy_id).await?;
    if reserved.is_none() {
        return Err(Error::BadRequest {
            message: "Puppy is not available for purchase".to_string(),
        });
    }

    let redirect_url = format!(
        "{}{}",
        state.config.dashboard_url.trim_end_matches('/'),
        state.config.square.checkout_redirect_path
    );
    let item_name = format!("Puppy Adoption - {}", puppy.name);
    let customer_email = request.customer_email.clone().unwrap_or_else(|| user.email.clone());

    let payment_link = match provider
        .create_payment_link(&item_name, puppy.price, &redirect_url, Some(&customer_email))
        .await
    {
        Ok(link) => link,
        Err(error) => return Err(abort_checkout(&mut conn, request.puppy_id, error.into()).await),
    };

    // Webhook events carry the order id, so prefer it as the session key
    let session_id = payment_link.order_id.clone().unwrap_or_else(|| payment_link.id.clone());

    let session_request = PaymentSessionCreateDBRequest {
        puppy_id: Some(puppy.id),
        user_id: Some(user.id),
        amount: puppy.price,
        status: "pending".to_string(),
        payment_provider: "square".to_string(),
        session_id: Some(session_id.clone()),
        payment_id: None,
        customer_email: Some(customer_email),
        metadata: Some(json!({
            "checkout_url": payment_link.url,
            "payment_link_id": payment_link.id,
        })),
    };
    // A session row the webhook can reconcile is part of a successful
    // checkout; without one the puppy would stay reserved forever
    let session = match PaymentSessions::new(&mut conn).create(&session_request).await {
        Ok(session) => session,
        Err(error) => return Err(abort_checkout(&mut conn, request.puppy_id, error.into()).await),
    };

    Ok(Json(CheckoutResponse {
        checkout_url: payment_link.url,
        session_id,
        payment_session_id: session.id,
    }))
}

/// Create and send a Square invoice for a puppy (admin back office).
#[utoipa::path(
    post,
    path = "/store/invoices",
    tag = "payments",
    request_body = InvoiceRequest,
    responses(
        (status = 201, description = "Invoice published", body = InvoiceResponse),
        (status = 400, description = "Square not configured"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Puppy not found"),
    )
)]
#[tracing::instrument(skip_all, fields(puppy_id = %crate::types::abbrev_uuid(&request.puppy_id)))]
pub async fn create_invoice(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<InvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), Error> {
    require_admin(&user, Operation::Create, Resource::Payments)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let puppy = Puppies::new(&mut conn)
        .get_by_id(request.puppy_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Puppy".to_string(),
            id: request.puppy_id.to_string(),
        })?;

    let provider = square_provider(&state, &mut conn).await?;
    let amount = request.amount.unwrap_or(puppy.price);

    let customer_id = provider
        .find_or_create_customer(&request.customer_email, request.customer_name.as_deref())
        .await?;
    let item_name = format!("Puppy Adoption - {}", puppy.name);
    let order_id = provider.create_order(&customer_id, &item_name, amount).await?;
    let invoice = provider
        .create_and_publish_invoice(
            &order_id,
            &customer_id,
            &format!("Adoption Invoice for {}", puppy.name),
            state.config.square.invoice_due_days,
        )
        .await?;

    // Hold the puppy while the invoice is outstanding; an already reserved or
    // sold puppy stays as it is
    if let Err(error) = Puppies::new(&mut conn).try_reserve(puppy.id).await {
        tracing::warn!(%error, "Failed to reserve puppy for invoice");
    }

    let session = PaymentSessions::new(&mut conn)
        .create(&PaymentSessionCreateDBRequest {
            puppy_id: Some(puppy.id),
            user_id: None,
            amount,
            status: "pending".to_string(),
            payment_provider: "square".to_string(),
            session_id: Some(order_id),
            payment_id: None,
            customer_email: Some(request.customer_email.clone()),
            metadata: Some(json!({
                "invoice_id": invoice.id,
                "invoice_url": invoice.public_url,
            })),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InvoiceResponse {
            invoice_id: invoice.id,
            invoice_url: invoice.public_url,
            payment_session_id: session.id,
        }),
    ))
}

/// Admin listing of all payment sessions.
#[utoipa::path(
    get,
    path = "/payments/sessions",
    tag = "payments",
    params(ListPaymentSessionsQuery),
    responses(
        (status = 200, description = "List of payment sessions", body = Vec<PaymentSessionResponse>),
        (status = 403, description = "Not an admin"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payment_sessions(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListPaymentSessionsQuery>,
) -> Result<Json<Vec<PaymentSessionResponse>>, Error> {
    require_admin(&user, Operation::Read, Resource::Payments)?;

    let (skip, limit) = query.pagination.params();
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let sessions = PaymentSessions::new(&mut conn).list(limit, skip).await?;

    Ok(Json(sessions.into_iter().map(PaymentSessionResponse::from).collect()))
}

/// Fetch a single payment session by id (admin).
#[tracing::instrument(skip_all, fields(session_id = %crate::types::abbrev_uuid(&id)))]
pub async fn get_payment_session(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<PaymentSessionId>,
) -> Result<Json<PaymentSessionResponse>, Error> {
    require_admin(&user, Operation::Read, Resource::Payments)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let session = PaymentSessions::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Payment session".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(PaymentSessionResponse::from(session)))
}

/// Payment sessions belonging to the authenticated customer.
#[tracing::instrument(skip_all)]
pub async fn list_my_payment_sessions(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<PaymentSessionResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let sessions = PaymentSessions::new(&mut conn).list_for_user(user.id).await?;

    Ok(Json(sessions.into_iter().map(PaymentSessionResponse::from).collect()))
}
