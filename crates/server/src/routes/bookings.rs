//! Booking endpoints: create, per-party listings, and the status
//! workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::Json;
use crate::routes::auth::CurrentUser;
use crate::routes::ServerState;
use service::booking::NewBooking;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub service_category: String,
    pub scheduled_date: DateTimeWithTimeZone,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[utoipa::path(post, path = "/api/bookings/{provider_id}", tag = "bookings",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses(
        (status = 201, description = "Booking created as pending"),
        (status = 400, description = "Category missing or not offered"),
        (status = 404, description = "Unknown provider profile"),
    ))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(provider_id): Path<Uuid>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .bookings
        .create(
            &current.actor,
            provider_id,
            NewBooking {
                service_category: body.service_category,
                scheduled_date: body.scheduled_date,
                notes: body.notes,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "booking requested", "booking": booking })),
    ))
}

#[utoipa::path(get, path = "/api/bookings/my-bookings", tag = "bookings",
    responses((status = 200, description = "The caller's bookings, providers attached")))]
pub async fn my_bookings(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bookings = state.bookings.my_bookings(&current.actor).await?;
    Ok(Json(json!({ "success": true, "bookings": bookings })))
}

#[utoipa::path(get, path = "/api/bookings/my-requests", tag = "bookings",
    responses(
        (status = 200, description = "Requests against the caller's profile, customers attached"),
        (status = 403, description = "Provider access required"),
    ))]
pub async fn my_requests(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requests = state.bookings.my_requests(&current.actor).await?;
    Ok(Json(json!({ "success": true, "bookings": requests })))
}

#[utoipa::path(put, path = "/api/bookings/update-status/{id}", tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Actor may not set this status"),
        (status = 404, description = "Unknown booking"),
    ))]
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let booking = state
        .bookings
        .update_status(&current.actor, id, &body.status)
        .await?;
    Ok(Json(json!({ "success": true, "booking": booking })))
}
