use async_trait::async_trait;
use models::booking::Model as Booking;
use models::booking_status::BookingStatus;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use super::domain::{CustomerBookingView, ProfileRef, ProviderBookingView};
use super::errors::BookingError;

/// Persistence boundary for the booking workflow. The authorization
/// matrix in the service runs entirely against this trait, so tests
/// exercise it with the in-memory mock below.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_profile(&self, profile_id: Uuid) -> Result<Option<ProfileRef>, BookingError>;
    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<ProfileRef>, BookingError>;
    async fn insert(
        &self,
        customer_id: Uuid,
        provider_profile_id: Uuid,
        service_category: &str,
        scheduled_date: DateTimeWithTimeZone,
        notes: &str,
    ) -> Result<Booking, BookingError>;
    async fn find(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError>;
    async fn set_status(&self, booking_id: Uuid, status: BookingStatus) -> Result<Booking, BookingError>;
    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<CustomerBookingView>, BookingError>;
    async fn list_for_provider(&self, profile_id: Uuid) -> Result<Vec<ProviderBookingView>, BookingError>;
}

pub mod mock {
    use super::*;
    use crate::booking::domain::UserSummary;
    use chrono::Utc;
    use models::booking_status::BookingStatus;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store seeded explicitly by each test.
    #[derive(Default)]
    pub struct MockBookingRepository {
        profiles: Mutex<HashMap<Uuid, ProfileRef>>,
        users: Mutex<HashMap<Uuid, UserSummary>>,
        bookings: Mutex<Vec<Booking>>,
    }

    impl MockBookingRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_profile(&self, profile: ProfileRef) {
            self.profiles.lock().unwrap().insert(profile.id, profile);
        }

        pub fn add_user(&self, summary: UserSummary) {
            self.users.lock().unwrap().insert(summary.id, summary);
        }

        fn summary_for(&self, user_id: Uuid) -> UserSummary {
            self.users.lock().unwrap().get(&user_id).cloned().unwrap_or(UserSummary {
                id: user_id,
                name: "unknown".into(),
                phone_number: String::new(),
                profile_image: None,
                email: String::new(),
            })
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn find_profile(&self, profile_id: Uuid) -> Result<Option<ProfileRef>, BookingError> {
            Ok(self.profiles.lock().unwrap().get(&profile_id).cloned())
        }

        async fn find_profile_by_user(
            &self,
            user_id: Uuid,
        ) -> Result<Option<ProfileRef>, BookingError> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .values()
                .find(|p| p.user_id == user_id)
                .cloned())
        }

        async fn insert(
            &self,
            customer_id: Uuid,
            provider_profile_id: Uuid,
            service_category: &str,
            scheduled_date: DateTimeWithTimeZone,
            notes: &str,
        ) -> Result<Booking, BookingError> {
            let now = Utc::now().into();
            let booking = Booking {
                id: Uuid::new_v4(),
                customer_id,
                provider_profile_id,
                service_category: service_category.to_string(),
                scheduled_date,
                notes: notes.to_string(),
                status: BookingStatus::Pending.as_str().to_string(),
                created_at: now,
                updated_at: now,
            };
            self.bookings.lock().unwrap().push(booking.clone());
            Ok(booking)
        }

        async fn find(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
            Ok(self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.id == booking_id)
                .cloned())
        }

        async fn set_status(
            &self,
            booking_id: Uuid,
            status: BookingStatus,
        ) -> Result<Booking, BookingError> {
            let mut bookings = self.bookings.lock().unwrap();
            let booking = bookings
                .iter_mut()
                .find(|b| b.id == booking_id)
                .ok_or_else(|| BookingError::NotFound("booking not found".into()))?;
            booking.status = status.as_str().to_string();
            booking.updated_at = Utc::now().into();
            Ok(booking.clone())
        }

        async fn list_for_customer(
            &self,
            customer_id: Uuid,
        ) -> Result<Vec<CustomerBookingView>, BookingError> {
            let profiles = self.profiles.lock().unwrap().clone();
            let mut rows: Vec<Booking> = self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.customer_id == customer_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
            Ok(rows
                .into_iter()
                .map(|booking| {
                    let provider_user = profiles
                        .get(&booking.provider_profile_id)
                        .map(|p| p.user_id)
                        .unwrap_or_else(Uuid::new_v4);
                    CustomerBookingView { provider: self.summary_for(provider_user), booking }
                })
                .collect())
        }

        async fn list_for_provider(
            &self,
            profile_id: Uuid,
        ) -> Result<Vec<ProviderBookingView>, BookingError> {
            let mut rows: Vec<Booking> = self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.provider_profile_id == profile_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
            Ok(rows
                .into_iter()
                .map(|booking| ProviderBookingView {
                    customer: self.summary_for(booking.customer_id),
                    booking,
                })
                .collect())
        }
    }
}
