use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::AuthUser;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::errors::ModelError;
use models::{user, user_credentials};

pub struct SeaOrmAuthRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_model_err(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(msg) => AuthError::Validation(msg),
        ModelError::Db(msg) => AuthError::Repository(msg),
    }
}

fn map_user(model: user::Model) -> Result<AuthUser, AuthError> {
    let role = model.parsed_role().map_err(map_model_err)?;
    Ok(AuthUser {
        id: model.id,
        name: model.name,
        email: model.email,
        phone_number: model.phone_number,
        profile_image: model.profile_image,
        role,
    })
}

#[async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        user::find_by_email(&self.db, email)
            .await
            .map_err(map_model_err)?
            .map(map_user)
            .transpose()
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        use sea_orm::EntityTrait;
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
            .map(map_user)
            .transpose()
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
    ) -> Result<AuthUser, AuthError> {
        let model = user::create(&self.db, name, email, phone_number)
            .await
            .map_err(map_model_err)?;
        map_user(model)
    }

    async fn password_hash(&self, user_id: Uuid) -> Result<Option<String>, AuthError> {
        Ok(user_credentials::find_by_user(&self.db, user_id)
            .await
            .map_err(map_model_err)?
            .map(|c| c.password_hash))
    }

    async fn store_password_hash(
        &self,
        user_id: Uuid,
        hash: &str,
        algorithm: &str,
    ) -> Result<(), AuthError> {
        user_credentials::upsert_password(&self.db, user_id, hash, algorithm)
            .await
            .map_err(map_model_err)?;
        Ok(())
    }
}
