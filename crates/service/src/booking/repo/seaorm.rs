use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use uuid::Uuid;

use crate::booking::domain::{CustomerBookingView, ProfileRef, ProviderBookingView, UserSummary};
use crate::booking::errors::BookingError;
use crate::booking::repository::BookingRepository;
use models::booking::{self, Model as Booking};
use models::booking_status::BookingStatus;
use models::{provider_profile, user};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn user_summaries(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, UserSummary>, BookingError> {
        let rows = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(|u| (u.id, summary(u))).collect())
    }
}

fn summary(u: user::Model) -> UserSummary {
    UserSummary {
        id: u.id,
        name: u.name,
        phone_number: u.phone_number,
        profile_image: u.profile_image,
        email: u.email,
    }
}

fn profile_ref(model: provider_profile::Model) -> ProfileRef {
    let categories = model.categories();
    ProfileRef { id: model.id, user_id: model.user_id, categories }
}

// Referenced rows can vanish between queries; render a blank party
// rather than failing the whole listing.
fn missing_summary(id: Uuid) -> UserSummary {
    UserSummary {
        id,
        name: String::new(),
        phone_number: String::new(),
        profile_image: None,
        email: String::new(),
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_profile(&self, profile_id: Uuid) -> Result<Option<ProfileRef>, BookingError> {
        Ok(provider_profile::Entity::find_by_id(profile_id)
            .one(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))?
            .map(profile_ref))
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<ProfileRef>, BookingError> {
        Ok(provider_profile::find_by_user(&self.db, user_id)
            .await?
            .map(profile_ref))
    }

    async fn insert(
        &self,
        customer_id: Uuid,
        provider_profile_id: Uuid,
        service_category: &str,
        scheduled_date: DateTimeWithTimeZone,
        notes: &str,
    ) -> Result<Booking, BookingError> {
        Ok(booking::create(
            &self.db,
            customer_id,
            provider_profile_id,
            service_category,
            scheduled_date,
            notes,
        )
        .await?)
    }

    async fn find(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
        booking::Entity::find_by_id(booking_id)
            .one(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))
    }

    async fn set_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        Ok(booking::set_status(&self.db, booking_id, status).await?)
    }

    async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerBookingView>, BookingError> {
        let rows = booking::list_by_customer(&self.db, customer_id).await?;
        let profile_ids: Vec<Uuid> = rows.iter().map(|b| b.provider_profile_id).collect();
        let profiles = provider_profile::Entity::find()
            .filter(provider_profile::Column::Id.is_in(profile_ids))
            .all(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))?;
        let profile_to_user: HashMap<Uuid, Uuid> =
            profiles.iter().map(|p| (p.id, p.user_id)).collect();
        let user_ids: Vec<Uuid> = profile_to_user.values().copied().collect();
        let summaries = self.user_summaries(user_ids).await?;
        Ok(rows
            .into_iter()
            .map(|b| {
                let provider = profile_to_user
                    .get(&b.provider_profile_id)
                    .and_then(|uid| summaries.get(uid).cloned())
                    .unwrap_or_else(|| missing_summary(b.provider_profile_id));
                CustomerBookingView { provider, booking: b }
            })
            .collect())
    }

    async fn list_for_provider(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<ProviderBookingView>, BookingError> {
        let rows = booking::list_by_provider_profile(&self.db, profile_id).await?;
        let customer_ids: Vec<Uuid> = rows.iter().map(|b| b.customer_id).collect();
        let summaries = self.user_summaries(customer_ids).await?;
        Ok(rows
            .into_iter()
            .map(|b| {
                let customer = summaries
                    .get(&b.customer_id)
                    .cloned()
                    .unwrap_or_else(|| missing_summary(b.customer_id));
                ProviderBookingView { customer, booking: b }
            })
            .collect())
    }
}
