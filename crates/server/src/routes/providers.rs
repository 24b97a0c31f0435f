//! Provider profile and service-offering endpoints.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::Json;
use crate::routes::auth::CurrentUser;
use crate::routes::ServerState;
use service::provider::{self, NewOffering, ProfileUpdate};
use service::stats;

#[derive(Debug, Deserialize)]
pub struct BecomeProviderRequest {
    pub bio: String,
    pub experience: i32,
    #[serde(default)]
    pub service_categories: Vec<String>,
}

#[utoipa::path(post, path = "/api/provider-profile/become-provider", tag = "provider",
    responses(
        (status = 201, description = "Provider profile created, role flipped"),
        (status = 400, description = "Missing fields or already a provider"),
    ))]
pub async fn become_provider(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<BecomeProviderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = provider::become_provider(
        &state.db,
        current.actor.id,
        &body.bio,
        body.experience,
        &body.service_categories,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "you are now a provider", "profile": profile })),
    ))
}

#[utoipa::path(put, path = "/api/provider-profile/update-provider-profile", tag = "provider",
    responses(
        (status = 200, description = "Updated profile"),
        (status = 403, description = "Provider access required"),
    ))]
pub async fn update_provider_profile(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut update = ProfileUpdate::default();
    let mut categories: Vec<String> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("bio") => {
                update.bio = Some(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?)
            }
            Some("experience") => {
                let text = field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                let parsed = text
                    .parse::<i32>()
                    .map_err(|_| ApiError::BadRequest("experience must be a number".into()))?;
                update.experience = Some(parsed);
            }
            Some("service_categories") => {
                categories.push(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?)
            }
            Some("images") => {
                let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                update.new_images.push(bytes.to_vec());
            }
            _ => {}
        }
    }
    if !categories.is_empty() {
        update.service_categories = Some(categories);
    }

    let profile = provider::update_profile(
        &state.db,
        state.media.as_ref(),
        &state.media_folder,
        current.actor.id,
        update,
    )
    .await?;
    Ok(Json(json!({ "success": true, "profile": profile })))
}

#[utoipa::path(get, path = "/api/provider-profile/get-all-providers", tag = "provider",
    params(
        ("page" = Option<u32>, Query, description = "1-based page index"),
        ("per_page" = Option<u32>, Query, description = "Items per page, capped at 100"),
    ),
    responses((status = 200, description = "One page of provider profiles with offerings")))]
pub async fn get_all_providers(
    State(state): State<ServerState>,
    Query(page): Query<common::pagination::Pagination>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let providers = provider::list_providers(&state.db, page).await?;
    Ok(Json(json!({ "success": true, "providers": providers })))
}

#[utoipa::path(get, path = "/api/provider-profile/get-provider/{id}", tag = "provider",
    params(("id" = Uuid, Path, description = "Provider profile id")),
    responses(
        (status = 200, description = "One provider profile with offerings"),
        (status = 404, description = "Unknown profile"),
    ))]
pub async fn get_provider(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let view = provider::get_provider(&state.db, id).await?;
    Ok(Json(json!({ "success": true, "provider": view })))
}

#[utoipa::path(get, path = "/api/provider-profile/provider-dashboard-stats", tag = "provider",
    responses(
        (status = 200, description = "Status counts and recent bookings for the caller"),
        (status = 404, description = "Caller has no provider profile"),
    ))]
pub async fn dashboard_stats(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let profile = models::provider_profile::find_by_user(&state.db, current.actor.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("provider profile not found".into()))?;
    let dashboard = stats::dashboard(&state.db, Some(profile.id)).await?;
    Ok(Json(json!({ "success": true, "stats": dashboard })))
}

#[utoipa::path(post, path = "/api/provider-profile/service", tag = "provider",
    responses(
        (status = 201, description = "Offering published"),
        (status = 400, description = "Missing images or category not advertised"),
    ))]
pub async fn add_service(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut offering = NewOffering {
        service_category: String::new(),
        sub_categories: Vec::new(),
        keywords: Vec::new(),
        description: String::new(),
        images: Vec::new(),
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("service_category") => {
                offering.service_category =
                    field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?
            }
            Some("sub_categories") => offering
                .sub_categories
                .push(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?),
            Some("keywords") => offering
                .keywords
                .push(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?),
            Some("description") => {
                offering.description =
                    field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?
            }
            Some("images") => {
                let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                offering.images.push(bytes.to_vec());
            }
            _ => {}
        }
    }

    let created = provider::add_offering(
        &state.db,
        state.media.as_ref(),
        &state.media_folder,
        current.actor.id,
        offering,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "service": created })),
    ))
}

#[utoipa::path(delete, path = "/api/provider-profile/service/{service_id}", tag = "provider",
    params(("service_id" = Uuid, Path, description = "Offering id")),
    responses(
        (status = 200, description = "Offering and its images removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown offering"),
    ))]
pub async fn delete_service(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    provider::delete_offering(&state.db, state.media.as_ref(), current.actor.id, service_id).await?;
    Ok(Json(json!({ "success": true, "message": "service removed" })))
}
