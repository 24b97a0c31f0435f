use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        routes::users::register,
        routes::users::login,
        routes::users::logout,
        routes::users::check_auth,
        routes::users::update_profile,
        routes::providers::become_provider,
        routes::providers::update_provider_profile,
        routes::providers::get_all_providers,
        routes::providers::get_provider,
        routes::providers::dashboard_stats,
        routes::providers::add_service,
        routes::providers::delete_service,
        routes::bookings::create,
        routes::bookings::my_bookings,
        routes::bookings::my_requests,
        routes::bookings::update_status,
        routes::comments::create_comment,
        routes::comments::get_comments,
        routes::comments::update_comment,
        routes::comments::delete_comment,
        routes::admin::dashboard_stats,
        routes::admin::all_bookings,
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "user", description = "Accounts and sessions"),
        (name = "provider", description = "Provider profiles and offerings"),
        (name = "bookings", description = "Booking workflow"),
        (name = "comments", description = "Profile comments"),
        (name = "admin", description = "Platform administration"),
    ),
    info(
        title = "LocalHands API",
        description = "Marketplace backend connecting customers with local service providers"
    )
)]
pub struct ApiDoc;
