//! Booking workflow: creation, role-gated status changes, and the
//! per-party listings.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{CustomerBookingView, NewBooking, ProfileRef, ProviderBookingView, UserSummary};
pub use errors::BookingError;
pub use repo::seaorm::SeaOrmBookingRepository;
pub use repository::BookingRepository;
pub use service::BookingService;
