//! OpenAPI documentation for the admin API.
//!
//! Covers the authenticated surfaces (auth, user management, integrations,
//! payments, webhooks). The public storefront endpoints are intentionally
//! undocumented here; the storefront consumes them directly.

use utoipa::OpenApi;

use crate::api::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "kennelctl API",
        description = "Backend service for a dog-breeder storefront: catalog, content, checkout, and payment-integration management."
    ),
    paths(
        handlers::auth::get_registration_info,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::integrations::upsert_integration,
        handlers::integrations::list_integrations,
        handlers::integrations::delete_integration,
        handlers::payments::create_checkout,
        handlers::payments::create_invoice,
        handlers::payments::list_payment_sessions,
        handlers::webhooks::square_webhook,
    ),
    components(schemas(
        models::auth::LoginRequest,
        models::auth::RegisterRequest,
        models::auth::SessionResponse,
        models::auth::RegistrationInfo,
        models::auth::AuthSuccessResponse,
        models::users::Role,
        models::users::UserCreate,
        models::users::UserUpdate,
        models::users::UserResponse,
        models::users::CurrentUser,
        models::integrations::IntegrationEnvironment,
        models::integrations::IntegrationUpsert,
        models::integrations::IntegrationDelete,
        models::integrations::IntegrationResponse,
        models::payments::CheckoutRequest,
        models::payments::CheckoutResponse,
        models::payments::InvoiceRequest,
        models::payments::InvoiceResponse,
        models::payments::PaymentSessionResponse,
    )),
    tags(
        (name = "authentication", description = "Session management"),
        (name = "users", description = "User administration"),
        (name = "integrations", description = "Encrypted third-party credentials"),
        (name = "payments", description = "Checkout and invoicing via Square"),
        (name = "webhooks", description = "Inbound provider notifications"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json().expect("spec should serialize");
        assert!(json.contains("/store/checkout"));
        assert!(json.contains("IntegrationUpsert"));
    }
}
