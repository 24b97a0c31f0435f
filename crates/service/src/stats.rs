//! Dashboard aggregation for admins and providers.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::booking::domain::UserSummary;
use crate::errors::ServiceError;
use models::booking_status::BookingStatus;
use models::{booking, provider_profile, user};

const RECENT_LIMIT: u64 = 5;

/// Booking totals keyed by status. Every status is present even when
/// its count is zero.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl StatusCounts {
    /// Fold grouped (status, count) rows into the fixed shape.
    /// Unrecognized status strings are ignored.
    pub fn from_rows(rows: &[(String, i64)]) -> Self {
        let mut counts = StatusCounts::default();
        for (status, n) in rows {
            let n = u64::try_from(*n).unwrap_or(0);
            match status.parse::<BookingStatus>() {
                Ok(BookingStatus::Pending) => counts.pending += n,
                Ok(BookingStatus::Accepted) => counts.accepted += n,
                Ok(BookingStatus::Rejected) => counts.rejected += n,
                Ok(BookingStatus::Completed) => counts.completed += n,
                Ok(BookingStatus::Cancelled) => counts.cancelled += n,
                Err(_) => {}
            }
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.pending + self.accepted + self.rejected + self.completed + self.cancelled
    }
}

/// A booking with both parties attached, used in dashboards and the
/// admin listing.
#[derive(Debug, Serialize)]
pub struct BookingWithParties {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub customer: UserSummary,
    pub provider: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_bookings: u64,
    pub status_counts: StatusCounts,
    pub recent_bookings: Vec<BookingWithParties>,
}

/// Dashboard numbers. `scope` restricts everything to one provider
/// profile; `None` is the platform-wide admin view.
pub async fn dashboard(
    db: &DatabaseConnection,
    scope: Option<Uuid>,
) -> Result<DashboardStats, ServiceError> {
    let mut query = booking::Entity::find()
        .select_only()
        .column(booking::Column::Status)
        .column_as(booking::Column::Id.count(), "count")
        .group_by(booking::Column::Status);
    if let Some(profile_id) = scope {
        query = query.filter(booking::Column::ProviderProfileId.eq(profile_id));
    }
    let rows: Vec<(String, i64)> = query
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let status_counts = StatusCounts::from_rows(&rows);

    let recent = booking::recent(db, scope, RECENT_LIMIT).await?;
    let recent_bookings = attach_parties(db, recent).await?;

    Ok(DashboardStats {
        total_bookings: status_counts.total(),
        status_counts,
        recent_bookings,
    })
}

/// Every booking on the platform, newest first, both parties attached.
pub async fn all_bookings(db: &DatabaseConnection) -> Result<Vec<BookingWithParties>, ServiceError> {
    use sea_orm::QueryOrder;
    let rows = booking::Entity::find()
        .order_by_desc(booking::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    attach_parties(db, rows).await
}

async fn attach_parties(
    db: &DatabaseConnection,
    rows: Vec<booking::Model>,
) -> Result<Vec<BookingWithParties>, ServiceError> {
    let profile_ids: Vec<Uuid> = rows.iter().map(|b| b.provider_profile_id).collect();
    let profiles = provider_profile::Entity::find()
        .filter(provider_profile::Column::Id.is_in(profile_ids))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let profile_to_user: HashMap<Uuid, Uuid> = profiles.iter().map(|p| (p.id, p.user_id)).collect();

    let mut user_ids: Vec<Uuid> = rows.iter().map(|b| b.customer_id).collect();
    user_ids.extend(profile_to_user.values().copied());
    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let summaries: HashMap<Uuid, UserSummary> = users
        .into_iter()
        .map(|u| {
            (
                u.id,
                UserSummary {
                    id: u.id,
                    name: u.name,
                    phone_number: u.phone_number,
                    profile_image: u.profile_image,
                    email: u.email,
                },
            )
        })
        .collect();
    let lookup = |id: &Uuid| {
        summaries.get(id).cloned().unwrap_or(UserSummary {
            id: *id,
            name: String::new(),
            phone_number: String::new(),
            profile_image: None,
            email: String::new(),
        })
    };

    Ok(rows
        .into_iter()
        .map(|b| {
            let provider_user = profile_to_user
                .get(&b.provider_profile_id)
                .copied()
                .unwrap_or(b.provider_profile_id);
            BookingWithParties {
                customer: lookup(&b.customer_id),
                provider: lookup(&provider_user),
                booking: b,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rows_yield_all_zeroes() {
        let counts = StatusCounts::from_rows(&[]);
        assert_eq!(counts, StatusCounts::default());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn rows_fold_into_fixed_shape() {
        let rows = vec![
            ("pending".to_string(), 3),
            ("completed".to_string(), 2),
            ("cancelled".to_string(), 1),
        ];
        let counts = StatusCounts::from_rows(&rows);
        assert_eq!(counts.pending, 3);
        assert_eq!(counts.completed, 2);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(counts.accepted, 0);
        assert_eq!(counts.rejected, 0);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn unknown_status_strings_are_ignored() {
        let rows = vec![("archived".to_string(), 9), ("accepted".to_string(), 1)];
        let counts = StatusCounts::from_rows(&rows);
        assert_eq!(counts.total(), 1);
    }
}

#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::test_support;
    use chrono::Utc;

    #[tokio::test]
    async fn scoped_dashboard_counts_only_that_profile() {
        let Some(db) = test_support::get_db().await else { return };
        let (_, profile) = test_support::seed_provider(&db, "dash", &["Tutoring"]).await;
        let customer = test_support::seed_customer(&db, "dash_cust").await;

        let empty = dashboard(&db, Some(profile.id)).await.expect("empty dashboard");
        assert_eq!(empty.total_bookings, 0);
        assert_eq!(empty.status_counts, StatusCounts::default());
        assert!(empty.recent_bookings.is_empty());

        booking::create(&db, customer.id, profile.id, "Tutoring", Utc::now().into(), "")
            .await
            .expect("seed booking");

        let stats = dashboard(&db, Some(profile.id)).await.expect("dashboard");
        assert_eq!(stats.total_bookings, 1);
        assert_eq!(stats.status_counts.pending, 1);
        assert_eq!(stats.recent_bookings.len(), 1);
        assert_eq!(stats.recent_bookings[0].customer.id, customer.id);
    }
}
