use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::provider_profile;

/// One uploaded portfolio image on the external media store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_offering")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_profile_id: Uuid,
    pub service_category: String,
    /// JSON array of strings.
    pub sub_categories: Json,
    /// JSON array of strings.
    pub keywords: Json,
    pub description: String,
    /// JSON array of `PortfolioImage` objects.
    pub portfolio_images: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ProviderProfile }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ProviderProfile => Entity::belongs_to(provider_profile::Entity)
                .from(Column::ProviderProfileId)
                .to(provider_profile::Column::Id)
                .into(),
        }
    }
}

impl Related<provider_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProviderProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn images(&self) -> Vec<PortfolioImage> {
        serde_json::from_value(self.portfolio_images.clone()).unwrap_or_default()
    }
}

pub async fn create(
    db: &DatabaseConnection,
    provider_profile_id: Uuid,
    service_category: &str,
    sub_categories: &[String],
    keywords: &[String],
    description: &str,
    portfolio_images: &[PortfolioImage],
) -> Result<Model, errors::ModelError> {
    if service_category.trim().is_empty() {
        return Err(errors::ModelError::Validation("service category required".into()));
    }
    if !provider_profile::is_allowed_category(service_category) {
        return Err(errors::ModelError::Validation(format!(
            "unknown service category: {}",
            service_category
        )));
    }
    let images = serde_json::to_value(portfolio_images)
        .map_err(|e| errors::ModelError::Validation(e.to_string()))?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_profile_id: Set(provider_profile_id),
        service_category: Set(service_category.to_string()),
        sub_categories: Set(serde_json::json!(sub_categories)),
        keywords: Set(serde_json::json!(keywords)),
        description: Set(description.to_string()),
        portfolio_images: Set(images),
        created_at: Set(Utc::now().into()),
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
