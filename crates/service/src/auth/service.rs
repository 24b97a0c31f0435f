use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::instrument;
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, Claims, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

const PASSWORD_ALGORITHM: &str = "argon2id";
const MIN_PASSWORD_LEN: usize = 8;

pub struct AuthService<R: AuthRepository> {
    repo: R,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self { repo, jwt_secret, token_ttl_hours }
    }

    /// Create an account and open a session for it. Duplicate emails
    /// are rejected before any row is written.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let name = input.name.trim();
        let email = input.email.trim();
        let phone = input.phone_number.trim();
        if name.is_empty() || email.is_empty() || phone.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("all fields are required".into()));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.repo.find_user_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        let user = self.repo.create_user(name, email, phone).await?;
        let hash = hash_password(&input.password)?;
        self.repo
            .store_password_hash(user.id, &hash, PASSWORD_ALGORITHM)
            .await?;
        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "account registered");
        Ok(AuthSession { user, token })
    }

    /// Verify credentials and issue a token. Unknown emails and wrong
    /// passwords produce the same error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_email(email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let stored = self
            .repo
            .password_hash(user.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &stored)?;
        let token = self.issue_token(&user)?;
        tracing::debug!(user_id = %user.id, "login succeeded");
        Ok(AuthSession { user, token })
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        self.repo.find_user_by_id(id).await
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(self.token_ttl_hours)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Token(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::Token(e.to_string()))
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use models::role::Role;

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(MockAuthRepository::new(), "test-secret".into(), 168)
    }

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Dana Fox".into(),
            email: email.into(),
            phone_number: "5550001111".into(),
            password: "hunter2hunter2".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = svc();
        let session = svc.register(input("dana@example.com")).await.unwrap();
        assert_eq!(session.user.role, Role::Customer);
        assert!(!session.token.is_empty());

        let again = svc.login("dana@example.com", "hunter2hunter2").await.unwrap();
        assert_eq!(again.user.id, session.user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let svc = svc();
        svc.register(input("dup@example.com")).await.unwrap();
        let err = svc.register(input("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = svc();
        let mut bad = input("short@example.com");
        bad.password = "short".into();
        let err = svc.register(bad).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let svc = svc();
        svc.register(input("who@example.com")).await.unwrap();

        let wrong = svc.login("who@example.com", "not-the-password").await.unwrap_err();
        let unknown = svc.login("ghost@example.com", "whatever").await.unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn token_round_trips_identity_and_role() {
        let svc = svc();
        let session = svc.register(input("claims@example.com")).await.unwrap();
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.role, "customer");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let svc = svc();
        let session = svc.register(input("tamper@example.com")).await.unwrap();
        let mut token = session.token;
        token.push('x');
        assert!(svc.verify_token(&token).is_err());
    }
}
