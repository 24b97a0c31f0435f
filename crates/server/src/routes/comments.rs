//! Comment endpoints. Reading is public; writing requires a session.

use axum::extract::{Path, State};
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
use service::comment;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

#[utoipa::path(post, path = "/api/comments/create-comment/{provider_id}", tag = "comments",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses(
        (status = 201, description = "Comment posted"),
        (status = 400, description = "Empty body or commenting on own profile"),
        (status = 404, description = "Unknown profile"),
    ))]
pub async fn create_comment(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(provider_id): Path<Uuid>,
    Json(body): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let posted = comment::create(&state.db, current.actor.id, provider_id, &body.body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "comment": posted })),
    ))
}

#[utoipa::path(get, path = "/api/comments/get-comments/{provider_id}", tag = "comments",
    params(("provider_id" = Uuid, Path, description = "Provider profile id")),
    responses((status = 200, description = "Comments on the profile, authors attached")))]
pub async fn get_comments(
    State(state): State<ServerState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let comments = comment::list_for_profile(&state.db, provider_id).await?;
    Ok(Json(json!({ "success": true, "comments": comments })))
}

#[utoipa::path(put, path = "/api/comments/update-comment/{comment_id}", tag = "comments",
    params(("comment_id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment updated"),
        (status = 403, description = "Only the author may edit"),
        (status = 404, description = "Unknown comment"),
    ))]
pub async fn update_comment(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(comment_id): Path<Uuid>,
    Json(body): Json<CommentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = comment::update(&state.db, &current.actor, comment_id, &body.body).await?;
    Ok(Json(json!({ "success": true, "comment": updated })))
}

#[utoipa::path(delete, path = "/api/comments/delete/{comment_id}", tag = "comments",
    params(("comment_id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment removed"),
        (status = 403, description = "Only the author or an admin may delete"),
        (status = 404, description = "Unknown comment"),
    ))]
pub async fn delete_comment(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    comment::delete(&state.db, &current.actor, comment_id).await?;
    Ok(Json(json!({ "success": true, "message": "comment deleted" })))
}
