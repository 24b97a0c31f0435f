use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking_status::BookingStatus;
use crate::errors;
use crate::provider_profile;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    /// References the provider's PROFILE, not the provider's user row.
    pub provider_profile_id: Uuid,
    pub service_category: String,
    pub scheduled_date: DateTimeWithTimeZone,
    pub notes: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
    ProviderProfile,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(user::Entity)
                .from(Column::CustomerId)
                .to(user::Column::Id)
                .into(),
            Relation::ProviderProfile => Entity::belongs_to(provider_profile::Entity)
                .from(Column::ProviderProfileId)
                .to(provider_profile::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parsed status; rows written through this crate always hold a valid one.
    pub fn parsed_status(&self) -> Result<BookingStatus, errors::ModelError> {
        self.status.parse()
    }
}

pub async fn create(
    db: &DatabaseConnection,
    customer_id: Uuid,
    provider_profile_id: Uuid,
    service_category: &str,
    scheduled_date: DateTimeWithTimeZone,
    notes: &str,
) -> Result<Model, errors::ModelError> {
    if service_category.trim().is_empty() {
        return Err(errors::ModelError::Validation("service category required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        provider_profile_id: Set(provider_profile_id),
        service_category: Set(service_category.to_string()),
        scheduled_date: Set(scheduled_date),
        notes: Set(notes.to_string()),
        status: Set(BookingStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite the status. Party references never change here.
pub async fn set_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: BookingStatus,
) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("booking not found".into()))?
        .into();
    am.status = Set(status.as_str().to_string());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_customer(db: &DatabaseConnection, customer_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::CustomerId.eq(customer_id))
        .order_by_desc(Column::ScheduledDate)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_provider_profile(
    db: &DatabaseConnection,
    provider_profile_id: Uuid,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::ProviderProfileId.eq(provider_profile_id))
        .order_by_desc(Column::ScheduledDate)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Most recently created bookings, optionally restricted to one provider.
pub async fn recent(
    db: &DatabaseConnection,
    provider_profile_id: Option<Uuid>,
    limit: u64,
) -> Result<Vec<Model>, errors::ModelError> {
    let mut query = Entity::find();
    if let Some(pid) = provider_profile_id {
        query = query.filter(Column::ProviderProfileId.eq(pid));
    }
    query
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
