use std::str::FromStr;

use models::booking::Model as Booking;
use models::booking_status::BookingStatus;
use models::role::Role;
use tracing::instrument;
use uuid::Uuid;

use super::domain::{CustomerBookingView, NewBooking, ProviderBookingView};
use super::errors::BookingError;
use super::repository::BookingRepository;
use crate::actor::Actor;

pub struct BookingService<R: BookingRepository> {
    repo: R,
}

/// Who may set which status. Customers may only cancel their own
/// booking; the booked provider may accept, reject, or complete but
/// never cancel or reset to pending. Anyone else is turned away.
pub fn authorize_status_change(
    is_customer: bool,
    is_provider: bool,
    target: BookingStatus,
) -> Result<(), BookingError> {
    if !is_customer && !is_provider {
        return Err(BookingError::Forbidden(
            "you are not authorized to update this booking".into(),
        ));
    }
    if is_customer && target != BookingStatus::Cancelled {
        return Err(BookingError::Forbidden(
            "customers can only cancel their bookings".into(),
        ));
    }
    if is_provider && matches!(target, BookingStatus::Cancelled | BookingStatus::Pending) {
        return Err(BookingError::Forbidden(
            "providers can only accept, reject, or complete bookings".into(),
        ));
    }
    Ok(())
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// File a booking request against a provider profile. The request
    /// starts out pending and must name a category the provider
    /// actually advertises.
    #[instrument(skip(self, input), fields(actor = %actor.id))]
    pub async fn create(
        &self,
        actor: &Actor,
        provider_profile_id: Uuid,
        input: NewBooking,
    ) -> Result<Booking, BookingError> {
        if input.service_category.trim().is_empty() {
            return Err(BookingError::Validation("service category is required".into()));
        }
        let profile = self
            .repo
            .find_profile(provider_profile_id)
            .await?
            .ok_or_else(|| BookingError::NotFound("service provider not found".into()))?;
        if !profile.offers(&input.service_category) {
            return Err(BookingError::Validation(
                "the provider does not offer this service".into(),
            ));
        }
        let booking = self
            .repo
            .insert(
                actor.id,
                profile.id,
                &input.service_category,
                input.scheduled_date,
                &input.notes,
            )
            .await?;
        tracing::info!(booking_id = %booking.id, profile_id = %profile.id, "booking created");
        Ok(booking)
    }

    /// Apply a status change requested by `actor`. Checks run in a
    /// fixed order: the booking must exist, the status string must
    /// parse, then the actor's relationship to the booking decides
    /// what they may set. The new status overwrites the old one
    /// without consulting it.
    #[instrument(skip(self), fields(actor = %actor.id, booking = %booking_id))]
    pub async fn update_status(
        &self,
        actor: &Actor,
        booking_id: Uuid,
        requested: &str,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .repo
            .find(booking_id)
            .await?
            .ok_or_else(|| BookingError::NotFound("booking not found".into()))?;
        let target = BookingStatus::from_str(requested)
            .map_err(|_| BookingError::Validation("invalid status provided".into()))?;

        let is_customer = actor.role == Role::Customer && booking.customer_id == actor.id;
        let own_profile = self.repo.find_profile_by_user(actor.id).await?;
        let is_provider = actor.role == Role::Provider
            && own_profile
                .as_ref()
                .is_some_and(|p| p.id == booking.provider_profile_id);

        authorize_status_change(is_customer, is_provider, target)?;

        let updated = self.repo.set_status(booking.id, target).await?;
        tracing::info!(status = %target, "booking status updated");
        Ok(updated)
    }

    /// Bookings the actor placed, newest scheduled first, provider
    /// attached.
    pub async fn my_bookings(&self, actor: &Actor) -> Result<Vec<CustomerBookingView>, BookingError> {
        self.repo.list_for_customer(actor.id).await
    }

    /// Requests against the actor's provider profile, newest scheduled
    /// first, customer attached.
    pub async fn my_requests(&self, actor: &Actor) -> Result<Vec<ProviderBookingView>, BookingError> {
        let profile = self
            .repo
            .find_profile_by_user(actor.id)
            .await?
            .ok_or_else(|| BookingError::NotFound("provider profile not found".into()))?;
        self.repo.list_for_provider(profile.id).await
    }
}
