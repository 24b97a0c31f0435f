//! Token validation middleware and role guards. The token travels in
//! an HTTP-only cookie with an `Authorization: Bearer` fallback.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::errors::ApiError;
use crate::routes::ServerState;
use models::role::Role;
use service::actor::Actor;

pub const AUTH_COOKIE: &str = "auth_token";

/// The authenticated account, injected into request extensions by
/// [`require_auth`].
#[derive(Clone)]
pub struct CurrentUser {
    pub user: models::user::Model,
    pub actor: Actor,
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}

/// Resolve the token to a live account and stash it in extensions.
/// Handlers downstream read `Extension<CurrentUser>`.
pub async fn require_auth(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| bearer_token(&req))
        .ok_or_else(ApiError::unauthenticated)?;

    let claims = state.auth.verify_token(&token)?;
    let user = service::user_service::find(&state.db, claims.sub)
        .await?
        .ok_or_else(ApiError::unauthenticated)?;
    let role = user.parsed_role()?;

    req.extensions_mut()
        .insert(CurrentUser { actor: Actor::new(user.id, role), user });
    Ok(next.run(req).await)
}

pub async fn require_provider(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<CurrentUser>() {
        Some(current) if current.actor.role == Role::Provider => Ok(next.run(req).await),
        Some(_) => Err(ApiError::Forbidden("provider access required".into())),
        None => Err(ApiError::unauthenticated()),
    }
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<CurrentUser>() {
        Some(current) if current.actor.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(ApiError::Forbidden("admin access required".into())),
        None => Err(ApiError::unauthenticated()),
    }
}

/// Session cookie carrying the signed token. Expiry is enforced by the
/// token itself.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

pub fn expired_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}
