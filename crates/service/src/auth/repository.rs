use async_trait::async_trait;
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

/// Persistence boundary for accounts and credentials. Kept narrow so
/// the service logic can run against an in-memory store in tests.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
    ) -> Result<AuthUser, AuthError>;
    async fn password_hash(&self, user_id: Uuid) -> Result<Option<String>, AuthError>;
    async fn store_password_hash(
        &self,
        user_id: Uuid,
        hash: &str,
        algorithm: &str,
    ) -> Result<(), AuthError>;
}

pub mod mock {
    use super::*;
    use models::role::Role;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, AuthUser>>,
        hashes: Mutex<HashMap<Uuid, String>>,
    }

    impl MockAuthRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn create_user(
            &self,
            name: &str,
            email: &str,
            phone_number: &str,
        ) -> Result<AuthUser, AuthError> {
            let user = AuthUser {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: email.to_string(),
                phone_number: phone_number.to_string(),
                profile_image: None,
                role: Role::Customer,
            };
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user)
        }

        async fn password_hash(&self, user_id: Uuid) -> Result<Option<String>, AuthError> {
            Ok(self.hashes.lock().unwrap().get(&user_id).cloned())
        }

        async fn store_password_hash(
            &self,
            user_id: Uuid,
            hash: &str,
            _algorithm: &str,
        ) -> Result<(), AuthError> {
            self.hashes.lock().unwrap().insert(user_id, hash.to_string());
            Ok(())
        }
    }
}
