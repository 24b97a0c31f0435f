//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod actor;
pub mod auth;
pub mod booking;
pub mod comment;
pub mod errors;
pub mod media;
pub mod provider;
pub mod stats;
pub mod user_service;

#[cfg(test)]
pub mod test_support;
