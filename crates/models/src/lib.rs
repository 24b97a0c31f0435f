pub mod booking;
pub mod booking_status;
pub mod comment;
pub mod db;
pub mod errors;
pub mod provider_profile;
pub mod role;
pub mod service_offering;
pub mod user;
pub mod user_credentials;

#[cfg(test)]
mod tests;
