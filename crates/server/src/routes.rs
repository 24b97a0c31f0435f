use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::auth::{AuthService, SeaOrmAuthRepository};
use service::booking::{BookingService, SeaOrmBookingRepository};
use service::media::{HttpMediaStore, MediaStore};

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod comments;
pub mod providers;
pub mod users;

/// Shared handler state. Cloning is cheap; the services hold their own
/// connection clones.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub bookings: Arc<BookingService<SeaOrmBookingRepository>>,
    pub media: Arc<dyn MediaStore>,
    pub media_folder: String,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        auth_cfg: &configs::AuthConfig,
        media_cfg: &configs::MediaConfig,
    ) -> Self {
        let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(media_cfg.upload_url.clone()));
        Self::with_media(db, auth_cfg, media, media_cfg.folder.clone())
    }

    /// Wire an explicit media store; tests inject the mock here.
    pub fn with_media(
        db: DatabaseConnection,
        auth_cfg: &configs::AuthConfig,
        media: Arc<dyn MediaStore>,
        media_folder: String,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            SeaOrmAuthRepository::new(db.clone()),
            auth_cfg.jwt_secret.clone(),
            auth_cfg.token_ttl_hours,
        ));
        let bookings = Arc::new(BookingService::new(SeaOrmBookingRepository::new(db.clone())));
        Self { db, auth, bookings, media, media_folder }
    }
}

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<common::types::Health> {
    Json(common::types::Health { status: "ok".into() })
}

pub fn build_router(state: ServerState) -> Router {
    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .merge(
            Router::new()
                .route("/check-auth", get(users::check_auth))
                .route("/update-profile", put(users::update_profile))
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth)),
        );

    let provider_routes = Router::new()
        .route("/get-all-providers", get(providers::get_all_providers))
        .route("/get-provider/:id", get(providers::get_provider))
        .merge(
            Router::new()
                .route("/become-provider", post(providers::become_provider))
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth)),
        )
        .merge(
            Router::new()
                .route("/update-provider-profile", put(providers::update_provider_profile))
                .route("/provider-dashboard-stats", get(providers::dashboard_stats))
                .route("/service", post(providers::add_service))
                .route("/service/:service_id", delete(providers::delete_service))
                .route_layer(middleware::from_fn(auth::require_provider))
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth)),
        );

    let booking_routes = Router::new()
        .merge(
            Router::new()
                .route("/my-requests", get(bookings::my_requests))
                .route_layer(middleware::from_fn(auth::require_provider)),
        )
        .route("/my-bookings", get(bookings::my_bookings))
        .route("/update-status/:id", put(bookings::update_status))
        .route("/:provider_id", post(bookings::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    let comment_routes = Router::new()
        .route("/get-comments/:provider_id", get(comments::get_comments))
        .merge(
            Router::new()
                .route("/create-comment/:provider_id", post(comments::create_comment))
                .route("/update-comment/:comment_id", put(comments::update_comment))
                .route("/delete/:comment_id", delete(comments::delete_comment))
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth)),
        );

    let admin_routes = Router::new()
        .route("/dashboard-stats", get(admin::dashboard_stats))
        .route("/all-bookings", get(admin::all_bookings))
        .route_layer(middleware::from_fn(auth::require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .nest("/api/user", user_routes)
        .nest("/api/provider-profile", provider_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/comments", comment_routes)
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
