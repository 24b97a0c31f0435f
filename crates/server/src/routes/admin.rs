//! Admin-only platform views.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::stats;

#[utoipa::path(get, path = "/api/admin/dashboard-stats", tag = "admin",
    responses(
        (status = 200, description = "Platform-wide status counts and recent bookings"),
        (status = 403, description = "Admin access required"),
    ))]
pub async fn dashboard_stats(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dashboard = stats::dashboard(&state.db, None).await?;
    Ok(Json(json!({ "success": true, "stats": dashboard })))
}

#[utoipa::path(get, path = "/api/admin/all-bookings", tag = "admin",
    responses(
        (status = 200, description = "Every booking, newest first, both parties attached"),
        (status = 403, description = "Admin access required"),
    ))]
pub async fn all_bookings(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bookings = stats::all_bookings(&state.db).await?;
    Ok(Json(json!({ "success": true, "bookings": bookings })))
}
