//! Registration, login and token issuance.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{AuthSession, AuthUser, Claims, RegisterInput};
pub use errors::AuthError;
pub use repo::seaorm::SeaOrmAuthRepository;
pub use repository::AuthRepository;
pub use service::AuthService;
