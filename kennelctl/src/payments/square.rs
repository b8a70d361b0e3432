//! Square REST API client.
//!
//! Thin wrapper over the hosted checkout, customer, order and invoice
//! endpoints. All calls authenticate with the access token from the
//! decrypted integration credentials and pin an explicit `Square-Version`.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use crate::api::models::integrations::IntegrationEnvironment;
use crate::payments::{PaymentError, Result, SquareCredentials};

type HmacSha256 = Hmac<Sha256>;

const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";
const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";

/// Header carrying Square's webhook signature.
pub const SIGNATURE_HEADER: &str = "x-square-hmacsha256-signature";

/// A hosted payment link returned by the checkout API
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLink {
    pub id: String,
    pub url: String,
    pub order_id: Option<String>,
}

/// A published invoice
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub version: i64,
    pub public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkEnvelope {
    payment_link: PaymentLink,
}

#[derive(Debug, Deserialize)]
struct Customer {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct CustomerSearchEnvelope {
    #[serde(default)]
    customers: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct CustomerEnvelope {
    customer: Customer,
}

#[derive(Debug, Deserialize)]
struct Order {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    order: Order,
}

#[derive(Debug, Deserialize)]
struct InvoiceEnvelope {
    invoice: Invoice,
}

/// Square API client bound to one set of decrypted credentials.
pub struct SquareProvider {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    location_id: String,
    api_version: String,
    webhook_signature_key: Option<String>,
}

impl SquareProvider {
    /// Build a provider from decrypted credentials.
    ///
    /// Fails when the blob is missing the access token or location id.
    pub fn new(
        http: reqwest::Client,
        credentials: SquareCredentials,
        environment: IntegrationEnvironment,
        api_version: &str,
    ) -> Result<Self> {
        let access_token = credentials
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PaymentError::InvalidCredentials("missing access_token".to_string()))?;
        let location_id = credentials
            .location_id
            .filter(|l| !l.is_empty())
            .ok_or_else(|| PaymentError::InvalidCredentials("missing location_id".to_string()))?;

        let base_url = match environment {
            IntegrationEnvironment::Production => PRODUCTION_BASE_URL,
            IntegrationEnvironment::Sandbox => SANDBOX_BASE_URL,
        };

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            access_token,
            location_id,
            api_version: api_version.to_string(),
            webhook_signature_key: credentials.webhook_signature_key.filter(|k| !k.is_empty()),
        })
    }

    /// Create a hosted checkout payment link for a single line item.
    pub async fn create_payment_link(
        &self,
        item_name: &str,
        amount: Decimal,
        redirect_url: &str,
        buyer_email: Option<&str>,
    ) -> Result<PaymentLink> {
        let mut body = json!({
            "idempotency_key": Uuid::new_v4().to_string(),
            "order": {
                "location_id": self.location_id,
                "line_items": [{
                    "name": item_name,
                    "quantity": "1",
                    "base_price_money": {
                        "amount": to_cents(amount)?,
                        "currency": "USD"
                    }
                }]
            },
            "payment_options": {
                "accept_partial_authorization": false
            },
            "checkout_options": {
                "redirect_url": redirect_url
            }
        });
        if let Some(email) = buyer_email {
            body["pre_populate_buyer_email"] = json!(email);
        }

        let envelope: PaymentLinkEnvelope = self.post("/v2/online-checkout/payment-links", &body).await?;
        tracing::info!(payment_link_id = %envelope.payment_link.id, "Created Square payment link");
        Ok(envelope.payment_link)
    }

    /// Look up a customer by email, creating one if none exists.
    pub async fn find_or_create_customer(&self, email: &str, name: Option<&str>) -> Result<String> {
        let search_body = json!({
            "query": { "filter": { "email_address": { "exact": email } } }
        });
        let search: CustomerSearchEnvelope = self.post("/v2/customers/search", &search_body).await?;
        if let Some(customer) = search.customers.into_iter().next() {
            return Ok(customer.id);
        }

        // Square wants given/family names as separate fields
        let (given_name, family_name) = match name {
            Some(full) => match full.split_once(' ') {
                Some((first, rest)) => (first.to_string(), rest.to_string()),
                None => (full.to_string(), String::new()),
            },
            None => (String::new(), String::new()),
        };

        let create_body = json!({
            "given_name": given_name,
            "family_name": family_name,
            "email_address": email
        });
        let created: CustomerEnvelope = self.post("/v2/customers", &create_body).await?;
        tracing::info!(customer_id = %created.customer.id, "Created Square customer");
        Ok(created.customer.id)
    }

    /// Create an order for a single line item, attached to a customer.
    pub async fn create_order(&self, customer_id: &str, item_name: &str, amount: Decimal) -> Result<String> {
        let body = json!({
            "order": {
                "location_id": self.location_id,
                "customer_id": customer_id,
                "line_items": [{
                    "name": item_name,
                    "quantity": "1",
                    "base_price_money": {
                        "amount": to_cents(amount)?,
                        "currency": "USD"
                    }
                }]
            }
        });
        let envelope: OrderEnvelope = self.post("/v2/orders", &body).await?;
        Ok(envelope.order.id)
    }

    /// Create a draft invoice for an order and publish it for email delivery.
    pub async fn create_and_publish_invoice(
        &self,
        order_id: &str,
        customer_id: &str,
        title: &str,
        due_days: i64,
    ) -> Result<Invoice> {
        let due_date = (Utc::now() + chrono::Duration::days(due_days))
            .format("%Y-%m-%d")
            .to_string();

        let create_body = json!({
            "invoice": {
                "order_id": order_id,
                "primary_recipient": { "customer_id": customer_id },
                "payment_requests": [{
                    "request_type": "BALANCE",
                    "due_date": due_date
                }],
                "delivery_method": "EMAIL",
                "title": title
            }
        });
        let draft: InvoiceEnvelope = self.post("/v2/invoices", &create_body).await?;

        let publish_body = json!({ "version": draft.invoice.version });
        let published: InvoiceEnvelope = self
            .post(&format!("/v2/invoices/{}/publish", draft.invoice.id), &publish_body)
            .await?;
        tracing::info!(invoice_id = %published.invoice.id, "Published Square invoice");
        Ok(published.invoice)
    }

    /// Verify the HMAC-SHA256 webhook signature.
    ///
    /// Square signs `{notification_url}{body}` with the webhook signature key
    /// and base64-encodes the digest. When no signature key is stored the
    /// event is accepted with a warning so a half-configured integration
    /// does not drop payment notifications.
    pub fn verify_webhook_signature(&self, notification_url: &str, body: &str, signature: Option<&str>) -> Result<()> {
        let Some(key) = &self.webhook_signature_key else {
            tracing::warn!("No webhook signature key configured; accepting event unverified");
            return Ok(());
        };
        let Some(signature) = signature else {
            return Err(PaymentError::InvalidSignature);
        };

        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|_| PaymentError::InvalidCredentials("invalid webhook signature key".to_string()))?;
        mac.update(notification_url.as_bytes());
        mac.update(body.as_bytes());
        let expected = BASE64_STANDARD.encode(mac.finalize().into_bytes());

        if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(PaymentError::InvalidSignature)
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.access_token)
            .header("Square-Version", &self.api_version)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(%status, path, "Square API error: {message}");
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Convert a dollar amount to integer cents, rejecting sub-cent precision loss.
fn to_cents(amount: Decimal) -> Result<i64> {
    let cents = (amount * Decimal::from(100)).round();
    cents
        .to_i64()
        .filter(|c| *c > 0)
        .ok_or_else(|| PaymentError::InvalidData(format!("Invalid payment amount: {amount}")))
}

/// A parsed webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payment details extracted from a `payment.*` event.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentObject {
    pub id: String,
    pub order_id: Option<String>,
    pub status: Option<String>,
}

impl WebhookEvent {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| PaymentError::InvalidData(format!("Malformed webhook body: {e}")))
    }

    /// Extract the payment object from `data.object.payment`, if present.
    pub fn payment(&self) -> Option<PaymentObject> {
        let payment = self.data.get("object")?.get("payment")?;
        serde_json::from_value(payment.clone()).ok()
    }

    /// Extract the order object from `data.object.order`, if present.
    pub fn order(&self) -> Option<&serde_json::Value> {
        self.data.get("object")?.get("order")
    }

    /// Extract the order id from `data.object.order`, if present.
    pub fn order_id(&self) -> Option<String> {
        self.order()?.get("id")?.as_str().map(str::to_string)
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> SquareCredentials {
        SquareCredentials {
            application_id: Some("sq0idp-test".to_string()),
            access_token: Some("EAAAl-test".to_string()),
            location_id: Some("L123".to_string()),
            webhook_signature_key: Some("signature-key".to_string()),
        }
    }

    fn provider() -> SquareProvider {
        SquareProvider::new(
            reqwest::Client::new(),
            credentials(),
            IntegrationEnvironment::Sandbox,
            "2024-01-18",
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_by_environment() {
        let sandbox = provider();
        assert_eq!(sandbox.base_url, SANDBOX_BASE_URL);

        let production = SquareProvider::new(
            reqwest::Client::new(),
            credentials(),
            IntegrationEnvironment::Production,
            "2024-01-18",
        )
        .unwrap();
        assert_eq!(production.base_url, PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_missing_access_token_rejected() {
        let mut creds = credentials();
        creds.access_token = None;
        let result = SquareProvider::new(reqwest::Client::new(), creds, IntegrationEnvironment::Sandbox, "2024-01-18");
        assert!(matches!(result, Err(PaymentError::InvalidCredentials(_))));

        let mut creds = credentials();
        creds.location_id = Some(String::new());
        let result = SquareProvider::new(reqwest::Client::new(), creds, IntegrationEnvironment::Sandbox, "2024-01-18");
        assert!(matches!(result, Err(PaymentError::InvalidCredentials(_))));
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(Decimal::new(150000, 2)).unwrap(), 150000);
        assert_eq!(to_cents(Decimal::new(9999, 2)).unwrap(), 9999);
        assert!(to_cents(Decimal::ZERO).is_err());
        assert!(to_cents(Decimal::new(-100, 0)).is_err());
    }

    #[test]
    fn test_webhook_signature_roundtrip() {
        let provider = provider();
        let url = "https://example.com/api/webhooks/square";
        let body = r#"{"type":"payment.updated","data":{}}"#;

        let mut mac = HmacSha256::new_from_slice(b"signature-key").unwrap();
        mac.update(url.as_bytes());
        mac.update(body.as_bytes());
        let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());

        assert!(provider.verify_webhook_signature(url, body, Some(&signature)).is_ok());
        assert!(matches!(
            provider.verify_webhook_signature(url, body, Some("bogus")),
            Err(PaymentError::InvalidSignature)
        ));
        assert!(matches!(
            provider.verify_webhook_signature(url, body, None),
            Err(PaymentError::InvalidSignature)
        ));
        assert!(matches!(
            provider.verify_webhook_signature(url, "tampered", Some(&signature)),
            Err(PaymentError::InvalidSignature)
        ));
    }

    #[test]
    fn test_webhook_without_key_accepted() {
        let mut creds = credentials();
        creds.webhook_signature_key = None;
        let provider =
            SquareProvider::new(reqwest::Client::new(), creds, IntegrationEnvironment::Sandbox, "2024-01-18").unwrap();
        assert!(provider.verify_webhook_signature("https://example.com", "{}", None).is_ok());
    }

    #[test]
    fn test_webhook_event_parsing() {
        let body = r#"{
            "type": "payment.updated",
            "data": {
                "object": {
                    "payment": {
                        "id": "pmt_1",
                        "order_id": "ord_1",
                        "status": "COMPLETED"
                    }
                }
            }
        }"#;
        let event = WebhookEvent::parse(body).unwrap();
        assert_eq!(event.event_type, "payment.updated");
        let payment = event.payment().unwrap();
        assert_eq!(payment.id, "pmt_1");
        assert_eq!(payment.order_id.as_deref(), Some("ord_1"));
        assert_eq!(payment.status.as_deref(), Some("COMPLETED"));
        assert!(event.order_id().is_none());
    }

    #[test]
    fn test_webhook_event_malformed() {
        assert!(WebhookEvent::parse("not json").is_err());
        let event = WebhookEvent::parse(r#"{"type":"order.updated"}"#).unwrap();
        assert!(event.payment().is_none());
    }
}
