//! Inbound payment webhooks.
//!
//! Square retries undelivered events, so the handler acknowledges everything
//! it can parse, even events it has no session for. Only signature failures
//! and infrastructure errors produce non-2xx responses.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    db::handlers::{PaymentSessions, Puppies},
    errors::Error,
    payments::square::{self, WebhookEvent},
    AppState,
};

pub const SQUARE_WEBHOOK_PATH: &str = "/webhooks/square";

/// Rebuild the public notification URL Square signed against.
///
/// Square signs `{notification_url}{body}`, and the notification URL is the
/// externally visible one, so honour the proxy's forwarded protocol header.
fn notification_url(headers: &HeaderMap) -> Option<String> {
    let host = headers.get("host")?.to_str().ok()?;
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("https");

    Some(format!("{proto}://{host}{SQUARE_WEBHOOK_PATH}"))
}

const TERMINAL_STATUSES: [&str; 3] = ["completed", "failed", "canceled"];

fn is_terminal(status: &str) -> bool {
    TERMINAL_STATUSES.contains(&status)
}

/// Session status after a payment event: the provider's status lowercased,
/// except a terminal status is never downgraded by a late or out-of-order
/// non-terminal event.
fn next_session_status(current: &str, payment_status: Option<&str>) -> String {
    let incoming = payment_status.map_or_else(|| "pending".to_string(), str::to_lowercase);
    if is_terminal(current) && !is_terminal(&incoming) {
        current.to_string()
    } else {
        incoming
    }
}

#[utoipa::path(
    post,
    path = "/webhooks/square",
    tag = "webhooks",
    responses(
        (status = 200, description = "Event processed"),
        (status = 401, description = "Invalid signature"),
        (status = 501, description = "Square integration not configured"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn square_webhook(State(state): State<AppState>, headers: HeaderMap, body: String) -> Result<StatusCode, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let provider = match super::payments::square_provider(&state, &mut conn).await {
        Ok(provider) => provider,
        Err(Error::BadRequest { message }) => {
            tracing::warn!(%message, "Received payment webhook without a configured Square integration");
            return Ok(StatusCode::NOT_IMPLEMENTED);
        }
        Err(other) => return Err(other),
    };

    let url = notification_url(&headers).ok_or_else(|| Error::BadRequest {
        message: "Missing Host header".to_string(),
    })?;
    let signature = headers.get(square::SIGNATURE_HEADER).and_then(|value| value.to_str().ok());
    provider.verify_webhook_signature(&url, &body, signature)?;

    let event = WebhookEvent::parse(&body)?;
    tracing::info!(event_type = %event.event_type, "Processing Square webhook event");

    if event.event_type.starts_with("payment.") {
        let Some(payment) = event.payment() else {
            tracing::warn!("Payment event without a payment object");
            return Ok(StatusCode::OK);
        };
        let Some(order_id) = payment.order_id.as_deref() else {
            tracing::warn!(payment_id = %payment.id, "Payment event without an order id");
            return Ok(StatusCode::OK);
        };

        let mut sessions = PaymentSessions::new(&mut conn);
        let Some(current) = sessions.get_by_provider_session(order_id).await? else {
            tracing::warn!(order_id, "Payment event for unknown payment session");
            return Ok(StatusCode::OK);
        };

        let status = next_session_status(&current.status, payment.status.as_deref());
        let Some(session) = sessions
            .update_by_provider_session(order_id, Some(&payment.id), &status)
            .await?
        else {
            tracing::warn!(order_id, "Payment session disappeared during update");
            return Ok(StatusCode::OK);
        };

        if let Some(puppy_id) = session.puppy_id {
            match status.as_str() {
                "completed" => {
                    Puppies::new(&mut conn).mark_sold(puppy_id, session.user_id).await?;
                    tracing::info!(order_id, "Checkout completed; puppy marked sold");
                }
                "failed" | "canceled" => {
                    Puppies::new(&mut conn).release_reservation(puppy_id).await?;
                    tracing::info!(order_id, %status, "Checkout did not complete; reservation released");
                }
                _ => {}
            }
        }
    } else if event.event_type.starts_with("order.") {
        // Order events carry no payment status; fold the order data into the
        // session metadata for the back office
        if let (Some(order_id), Some(order)) = (event.order_id(), event.order()) {
            let updated = PaymentSessions::new(&mut conn)
                .merge_metadata(&order_id, &serde_json::json!({ "order": order }))
                .await?;
            if updated.is_none() {
                tracing::debug!(order_id, "Order event for unknown payment session");
            }
        }
    }

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_notification_url_honours_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("shop.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(
            notification_url(&headers).unwrap(),
            "https://shop.example.com/webhooks/square"
        );
    }

    #[test]
    fn test_notification_url_defaults_to_https() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("shop.example.com"));
        assert!(notification_url(&headers).unwrap().starts_with("https://"));
    }

    #[test]
    fn test_notification_url_requires_host() {
        assert!(notification_url(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_status_passes_through_lowercased() {
        assert_eq!(next_session_status("pending", Some("COMPLETED")), "completed");
        assert_eq!(next_session_status("pending", Some("APPROVED")), "approved");
        assert_eq!(next_session_status("pending", Some("FAILED")), "failed");
        assert_eq!(next_session_status("pending", None), "pending");
    }

    #[test]
    fn test_terminal_status_never_downgraded() {
        assert_eq!(next_session_status("completed", Some("APPROVED")), "completed");
        assert_eq!(next_session_status("completed", Some("PENDING")), "completed");
        assert_eq!(next_session_status("completed", None), "completed");
        assert_eq!(next_session_status("canceled", Some("APPROVED")), "canceled");
        // A terminal-to-terminal transition is still allowed
        assert_eq!(next_session_status("failed", Some("COMPLETED")), "completed");
    }
}
