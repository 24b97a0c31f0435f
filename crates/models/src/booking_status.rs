use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of booking states. Stored as a string column on `booking`.
/// Every booking is created as `pending`; the other four are reachable via
/// the transition rules in the booking service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Accepted,
        BookingStatus::Rejected,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = crate::errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "accepted" => Ok(BookingStatus::Accepted),
            "rejected" => Ok(BookingStatus::Rejected),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(crate::errors::ModelError::Validation(format!("invalid status: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BookingStatus;
    use std::str::FromStr;

    #[test]
    fn round_trips_all_statuses() {
        for s in BookingStatus::ALL {
            assert_eq!(BookingStatus::from_str(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(BookingStatus::from_str("done").is_err());
        assert!(BookingStatus::from_str("Pending").is_err());
        assert!(BookingStatus::from_str("").is_err());
    }
}
