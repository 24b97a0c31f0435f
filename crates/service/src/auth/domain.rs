use models::role::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account view returned by auth operations. Never carries the
/// password hash.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub profile_image: Option<String>,
    pub role: Role,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Result of a successful login: the account plus a signed token the
/// transport layer turns into a cookie.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

/// JWT payload. `sub` is the user id, not the email, so renames do not
/// invalidate sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}
