use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::provider_profile;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_profile_id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ProviderProfile,
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ProviderProfile => Entity::belongs_to(provider_profile::Entity)
                .from(Column::ProviderProfileId)
                .to(provider_profile::Column::Id)
                .into(),
            Relation::Customer => Entity::belongs_to(user::Entity)
                .from(Column::CustomerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    provider_profile_id: Uuid,
    customer_id: Uuid,
    body: &str,
) -> Result<Model, errors::ModelError> {
    if body.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment text required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_profile_id: Set(provider_profile_id),
        customer_id: Set(customer_id),
        body: Set(body.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_profile(
    db: &DatabaseConnection,
    provider_profile_id: Uuid,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::ProviderProfileId.eq(provider_profile_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn update_body(db: &DatabaseConnection, id: Uuid, body: &str) -> Result<Model, errors::ModelError> {
    if body.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment text required".into()));
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("comment not found".into()))?
        .into();
    am.body = Set(body.to_string());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
