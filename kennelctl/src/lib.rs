//! kennelctl: backend service for a dog-breeder storefront.
//!
//! Serves three surfaces from one binary:
//!
//! - **Storefront** (`/store/...`): public catalog, blog, testimonials,
//!   inquiry forms, and the hosted-checkout entry point
//! - **Customer dashboard** (`/dashboard/...`): adoptions, payment history,
//!   and support chat for authenticated customers
//! - **Admin back office** (`/admin/api/v1/...`): catalog/content CRUD,
//!   user management, encrypted payment-provider credentials, audit trail
//!
//! Square credentials are stored AES-256-GCM encrypted in Postgres and
//! managed through the integrations API; payment flows load and decrypt them
//! per request. Square notifies payment completion via `/webhooks/square`.

pub mod api;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod payments;
pub mod telemetry;
pub mod types;

use std::time::Duration;

use axum::{
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use bon::Builder;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    api::models::users::Role,
    auth::password,
    config::CorsOrigin,
    db::{handlers::Users, models::users::{UserCreateDBRequest, UserUpdateDBRequest}},
    openapi::ApiDoc,
};

pub use config::Config;
pub use types::{ConversationId, IntegrationId, LitterId, PaymentSessionId, PuppyId, UserId};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Shared HTTP client for outbound payment API calls
    pub http: reqwest::Client,
}

/// Get the kennelctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: creates the admin on first startup, or refreshes the password
/// on later startups when one is configured.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, db: &PgPool) -> Result<UserId, errors::Error> {
    use db::handlers::Repository;

    let password_hash = match password {
        Some(pwd) => Some(password::hash_string(pwd)?),
        None => None,
    };

    let mut tx = db.begin().await.map_err(|e| errors::Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut tx);

    if let Some(existing) = user_repo.get_by_email(email).await? {
        if password_hash.is_some() {
            user_repo
                .update(
                    existing.id,
                    &UserUpdateDBRequest {
                        display_name: None,
                        role: None,
                        password_hash,
                    },
                )
                .await?;
        }
        tx.commit().await.map_err(|e| errors::Error::Database(e.into()))?;
        return Ok(existing.id);
    }

    let created = user_repo
        .create(&UserCreateDBRequest {
            email: email.to_string(),
            display_name: Some("Administrator".to_string()),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    tx.commit().await.map_err(|e| errors::Error::Database(e.into()))?;
    info!(email, "Created initial admin user");
    Ok(created.id)
}

/// Connect to Postgres, run migrations, and ensure the initial admin exists.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool_settings = &config.database.pool;
    let mut options = PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .min_connections(pool_settings.min_connections)
        .acquire_timeout(Duration::from_secs(pool_settings.acquire_timeout_secs));

    // 0 means "never" for both timeouts
    if pool_settings.idle_timeout_secs > 0 {
        options = options.idle_timeout(Duration::from_secs(pool_settings.idle_timeout_secs));
    }
    if pool_settings.max_lifetime_secs > 0 {
        options = options.max_lifetime(Duration::from_secs(pool_settings.max_lifetime_secs));
    }

    let pool = options.connect(&config.database.url).await?;

    info!("Running database migrations...");
    migrator().run(&pool).await?;

    create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create initial admin user: {e}"))?;

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.security.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.security.cors.allow_credentials)
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
        .expose_headers(vec![axum::http::header::LOCATION]);

    if let Some(max_age) = config.auth.security.cors.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    // Authentication routes (at root level)
    let auth_routes = Router::new()
        .route(
            "/authentication/register",
            get(api::handlers::auth::get_registration_info).post(api::handlers::auth::register),
        )
        .route("/authentication/login", post(api::handlers::auth::login))
        .route("/authentication/logout", post(api::handlers::auth::logout))
        .route("/authentication/me", get(api::handlers::auth::me))
        .with_state(state.clone());

    // Public storefront routes, plus checkout/invoicing (which authenticate
    // via the session cookie like everything else)
    let store_routes = Router::new()
        .route("/puppies", get(api::handlers::puppies::list_available_puppies))
        .route("/puppies/{id}", get(api::handlers::puppies::get_puppy))
        .route("/litters", get(api::handlers::litters::list_litters))
        .route("/litters/{id}", get(api::handlers::litters::get_litter))
        .route("/posts", get(api::handlers::posts::list_published_posts))
        .route("/posts/{slug}", get(api::handlers::posts::get_post_by_slug))
        .route("/testimonials", get(api::handlers::testimonials::list_testimonials))
        .route("/forms", post(api::handlers::form_submissions::create_submission))
        .route("/seo/{slug}", get(api::handlers::site::get_seo_meta))
        .route("/pwa-settings", get(api::handlers::site::get_pwa_settings))
        .route("/checkout", post(api::handlers::payments::create_checkout))
        .route("/invoices", post(api::handlers::payments::create_invoice))
        .with_state(state.clone());

    // Customer dashboard routes (any authenticated user; chat access is
    // checked per conversation)
    let dashboard_routes = Router::new()
        .route("/adoptions", get(api::handlers::puppies::list_my_adoptions))
        .route("/purchases", get(api::handlers::payments::list_my_payment_sessions))
        // Find-or-create is idempotent, so GET and POST share a handler
        .route(
            "/conversations",
            get(api::handlers::chat::get_my_conversation).post(api::handlers::chat::get_my_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            get(api::handlers::chat::list_messages).post(api::handlers::chat::post_message),
        )
        .route(
            "/conversations/{id}/presence",
            get(api::handlers::chat::list_presence).post(api::handlers::chat::update_presence),
        )
        .with_state(state.clone());

    // Admin API routes
    let api_routes = Router::new()
        // User management (admin only)
        .route("/users", get(api::handlers::users::list_users))
        .route("/users", post(api::handlers::users::create_user))
        .route("/users/{id}", get(api::handlers::users::get_user))
        .route("/users/{id}", patch(api::handlers::users::update_user))
        .route("/users/{id}", delete(api::handlers::users::delete_user))
        // Catalog
        .route("/puppies", get(api::handlers::puppies::list_puppies))
        .route("/puppies", post(api::handlers::puppies::create_puppy))
        .route("/puppies/{id}", get(api::handlers::puppies::get_puppy))
        .route("/puppies/{id}", patch(api::handlers::puppies::update_puppy))
        .route("/puppies/{id}", delete(api::handlers::puppies::delete_puppy))
        .route("/litters", get(api::handlers::litters::list_litters))
        .route("/litters", post(api::handlers::litters::create_litter))
        .route("/litters/{id}", get(api::handlers::litters::get_litter))
        .route("/litters/{id}", patch(api::handlers::litters::update_litter))
        .route("/litters/{id}", delete(api::handlers::litters::delete_litter))
        // Content
        .route("/posts", get(api::handlers::posts::list_posts))
        .route("/posts", post(api::handlers::posts::create_post))
        .route("/posts/{id}", get(api::handlers::posts::get_post))
        .route("/posts/{id}", patch(api::handlers::posts::update_post))
        .route("/posts/{id}", delete(api::handlers::posts::delete_post))
        .route("/testimonials", get(api::handlers::testimonials::list_testimonials))
        .route("/testimonials", post(api::handlers::testimonials::create_testimonial))
        .route("/testimonials/{id}", patch(api::handlers::testimonials::update_testimonial))
        .route("/testimonials/{id}", delete(api::handlers::testimonials::delete_testimonial))
        // Inquiry triage
        .route("/submissions", get(api::handlers::form_submissions::list_submissions))
        .route("/submissions/{id}", get(api::handlers::form_submissions::get_submission))
        .route("/submissions/{id}", patch(api::handlers::form_submissions::update_submission_status))
        .route("/submissions/{id}", delete(api::handlers::form_submissions::delete_submission))
        // Encrypted third-party credentials
        .route(
            "/integrations",
            get(api::handlers::integrations::list_integrations)
                .post(api::handlers::integrations::upsert_integration)
                .delete(api::handlers::integrations::delete_integration),
        )
        // Payment sessions
        .route("/payments/sessions", get(api::handlers::payments::list_payment_sessions))
        .route("/payments/sessions/{id}", get(api::handlers::payments::get_payment_session))
        // Support chat inbox
        .route("/conversations", get(api::handlers::chat::list_conversations))
        .route("/conversations/{id}", patch(api::handlers::chat::set_conversation_status))
        .route(
            "/conversations/{id}/messages",
            get(api::handlers::chat::list_messages).post(api::handlers::chat::post_message),
        )
        // Site settings
        .route(
            "/seo",
            get(api::handlers::site::list_seo_meta).post(api::handlers::site::upsert_seo_meta),
        )
        .route("/seo/{id}", delete(api::handlers::site::delete_seo_meta))
        .route(
            "/pwa-settings",
            get(api::handlers::site::get_pwa_settings).patch(api::handlers::site::update_pwa_settings),
        )
        // Audit trail
        .route("/change-logs", get(api::handlers::change_logs::list_change_logs))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        // Webhook routes (external services, not part of client API docs)
        .route("/webhooks/square", post(api::handlers::webhooks::square_webhook))
        .with_state(state.clone())
        .merge(auth_routes)
        .nest("/store", store_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/admin/api/v1", api_routes)
        .merge(Scalar::with_url("/admin/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] initializes the pool, runs migrations,
///    and ensures the initial admin user exists
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting kennelctl with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;

        let http = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).http(http).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("kennelctl listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
