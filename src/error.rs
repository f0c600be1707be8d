// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;
use crate::query::QueryError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 409 Conflict
    Conflict(String),

    // 422 Unprocessable Entity (well-formed but semantically invalid, or the store refused it)
    UnprocessableEntity(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::Conflict(_) => 409,
            ApiError::UnprocessableEntity(_) => 422,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Conflict(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Uniform failure envelope: `{success: false, error: <status>, message: <text>}`
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code(),
            "message": self.message(),
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::warn!(code = err.code(), "authorization failed: {}", err);
        let message = format!("{}: {}", err.code(), err);
        match err.status_code() {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            503 => ApiError::ServiceUnavailable(message),
            _ => ApiError::BadRequest(message),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::not_found(msg),
            StoreError::Conflict(msg) => ApiError::conflict(msg),
            StoreError::Backend(msg) => {
                // Don't expose storage details to clients
                tracing::error!("Storage error: {}", msg);
                ApiError::unprocessable_entity("Unprocessable Entity")
            }
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::PageOutOfRange { .. } => ApiError::not_found(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_numeric_status() {
        let body = ApiError::not_found("question 7 not found").to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
        assert_eq!(body["message"], "question 7 not found");
    }

    #[test]
    fn backend_store_errors_are_hidden() {
        let err: ApiError = StoreError::Backend("relation \"questions\" does not exist".to_string()).into();
        assert_eq!(err.status_code(), 422);
        assert!(!err.message().contains("relation"));
    }

    #[test]
    fn auth_errors_keep_their_status() {
        let forbidden: ApiError = AuthError::Forbidden("post:drinks".to_string()).into();
        assert_eq!(forbidden.status_code(), 403);

        let expired: ApiError = AuthError::ExpiredToken.into();
        assert_eq!(expired.status_code(), 401);
        assert!(expired.message().starts_with("token_expired"));

        let header: ApiError = AuthError::AuthHeader("Authorization header is expected".to_string()).into();
        assert_eq!(header.status_code(), 400);

        let unavailable: ApiError = AuthError::KeySetUnavailable("connection refused".to_string()).into();
        assert_eq!(unavailable.status_code(), 503);
        assert!(unavailable.message().starts_with("key_set_unavailable"));
    }

    #[test]
    fn page_out_of_range_is_not_found() {
        let err: ApiError = QueryError::PageOutOfRange { page: 9, last_page: 2 }.into();
        assert_eq!(err.status_code(), 404);
    }
}
