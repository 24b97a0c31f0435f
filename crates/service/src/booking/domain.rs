use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

/// Input for a new booking request. The target profile id travels in
/// the URL, not here.
#[derive(Clone, Debug)]
pub struct NewBooking {
    pub service_category: String,
    pub scheduled_date: DateTimeWithTimeZone,
    pub notes: String,
}

/// The slice of a provider profile the booking workflow needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRef {
    pub id: Uuid,
    pub user_id: Uuid,
    pub categories: Vec<String>,
}

impl ProfileRef {
    pub fn offers(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Public display fields of the counterpart party on a booking.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub profile_image: Option<String>,
    pub email: String,
}

/// A customer's booking with the provider attached.
#[derive(Clone, Debug, Serialize)]
pub struct CustomerBookingView {
    #[serde(flatten)]
    pub booking: models::booking::Model,
    pub provider: UserSummary,
}

/// A provider's incoming request with the customer attached.
#[derive(Clone, Debug, Serialize)]
pub struct ProviderBookingView {
    #[serde(flatten)]
    pub booking: models::booking::Model,
    pub customer: UserSummary,
}
