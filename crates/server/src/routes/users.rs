//! Account endpoints: register, login, logout, session check, and
//! profile updates.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::errors::ApiError;
use crate::extract::Json;
use crate::routes::auth::{expired_cookie, session_cookie, CurrentUser};
use crate::routes::ServerState;
use service::auth::RegisterInput;
use service::user_service::{self, AccountUpdate};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[utoipa::path(post, path = "/api/user/register", tag = "user",
    responses(
        (status = 201, description = "Account created, session cookie set"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered"),
    ))]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(body): Json<RegisterInput>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth.register(body).await?;
    let jar = jar.add(session_cookie(session.token));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({ "success": true, "message": "account created", "user": session.user })),
    ))
}

#[utoipa::path(post, path = "/api/user/login", tag = "user",
    responses(
        (status = 200, description = "Logged in, session cookie set"),
        (status = 401, description = "Invalid email or password"),
    ))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth.login(&body.email, &body.password).await?;
    let jar = jar.add(session_cookie(session.token));
    Ok((
        jar,
        Json(json!({ "success": true, "message": "logged in", "user": session.user })),
    ))
}

#[utoipa::path(post, path = "/api/user/logout", tag = "user",
    responses((status = 200, description = "Session cookie cleared")))]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(expired_cookie());
    (jar, Json(json!({ "success": true, "message": "logged out" })))
}

#[utoipa::path(get, path = "/api/user/check-auth", tag = "user",
    responses(
        (status = 200, description = "The authenticated account"),
        (status = 401, description = "No valid session"),
    ))]
pub async fn check_auth(Extension(current): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "user": current.user }))
}

#[utoipa::path(put, path = "/api/user/update-profile", tag = "user",
    responses(
        (status = 200, description = "Updated account"),
        (status = 400, description = "Invalid fields"),
        (status = 401, description = "No valid session"),
    ))]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut update = AccountUpdate::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("name") => {
                update.name = Some(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?)
            }
            Some("phone_number") => {
                update.phone_number =
                    Some(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?)
            }
            Some("profile_image") => {
                let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                update.profile_image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let updated = user_service::update_account(
        &state.db,
        state.media.as_ref(),
        &state.media_folder,
        current.actor.id,
        update,
    )
    .await?;
    Ok(Json(json!({ "success": true, "user": updated })))
}
