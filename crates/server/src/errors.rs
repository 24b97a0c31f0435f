use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use models::errors::ModelError;
use service::auth::AuthError;
use service::booking::BookingError;
use service::errors::ServiceError;

/// API-level error. Every failure leaving a handler becomes exactly one
/// of these, rendered as `{ "success": false, "message": ... }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &str) {
        match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        }
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized("authentication required".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(status = %status, message, "request failed");
        } else {
            tracing::debug!(status = %status, message, "request rejected");
        }
        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => ApiError::BadRequest(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Forbidden(m) => ApiError::Forbidden(m),
            ServiceError::Conflict(m) => ApiError::Conflict(m),
            ServiceError::Model(ModelError::Validation(m)) => ApiError::BadRequest(m),
            ServiceError::Model(ModelError::Db(m)) => ApiError::Internal(m),
            ServiceError::Db(m) | ServiceError::Upload(m) => ApiError::Internal(m),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ApiError::BadRequest(m),
            AuthError::EmailTaken => ApiError::Conflict("email is already registered".into()),
            AuthError::InvalidCredentials => ApiError::Unauthorized("invalid email or password".into()),
            AuthError::Token(_) => ApiError::Unauthorized("invalid or expired token".into()),
            AuthError::Hash(m) | AuthError::Repository(m) => ApiError::Internal(m),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Validation(m) => ApiError::BadRequest(m),
            BookingError::NotFound(m) => ApiError::NotFound(m),
            BookingError::Forbidden(m) => ApiError::Forbidden(m),
            BookingError::Repository(m) => ApiError::Internal(m),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ApiError::BadRequest(m),
            ModelError::Db(m) => ApiError::Internal(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (ApiError::from(ServiceError::Validation("x".into())), StatusCode::BAD_REQUEST),
            (ApiError::from(ServiceError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (ApiError::from(ServiceError::Forbidden("x".into())), StatusCode::FORBIDDEN),
            (ApiError::from(ServiceError::Conflict("x".into())), StatusCode::CONFLICT),
            (ApiError::from(ServiceError::Db("x".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::from(AuthError::EmailTaken), StatusCode::CONFLICT),
            (ApiError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (ApiError::from(BookingError::Forbidden("x".into())), StatusCode::FORBIDDEN),
        ];
        for (err, expected) in cases {
            assert_eq!(err.parts().0, expected);
        }
    }
}
