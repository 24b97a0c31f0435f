//! Account profile maintenance for any signed-in user.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::media::MediaStore;
use models::user;

#[derive(Clone, Debug, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<Vec<u8>>,
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Change name, phone number, or avatar. Email and role are not
/// editable here.
#[instrument(skip(db, media, update))]
pub async fn update_account(
    db: &DatabaseConnection,
    media: &dyn MediaStore,
    folder: &str,
    user_id: Uuid,
    update: AccountUpdate,
) -> Result<user::Model, ServiceError> {
    let account = find(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("user not found".into()))?;

    if let Some(name) = &update.name {
        user::validate_name(name)?;
    }
    if let Some(phone) = &update.phone_number {
        user::validate_phone_number(phone)?;
    }

    let uploaded_url = match update.profile_image {
        Some(bytes) => Some(media.upload(folder, bytes).await?.url),
        None => None,
    };

    let mut am = account.into_active_model();
    if let Some(name) = update.name {
        am.name = Set(name);
    }
    if let Some(phone) = update.phone_number {
        am.phone_number = Set(phone);
    }
    if let Some(url) = uploaded_url {
        am.profile_image = Set(Some(url));
    }
    am.updated_at = Set(chrono::Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}
