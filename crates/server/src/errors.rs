use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use tracing::error;

/// Error response rendered as `{"message": ..., "error": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: &'static str,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), error }
    }

    /// Extractor rejections keep axum's status. 422 stays `validation_error`,
    /// other statuses become `bad_request`.
    fn from_rejection(status: StatusCode, message: String) -> Self {
        let error = if status == StatusCode::UNPROCESSABLE_ENTITY { "validation_error" } else { "bad_request" };
        Self::new(status, error, message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = self.error, message = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({"message": self.message, "error": self.error}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "not_found", m),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "conflict", m),
            ServiceError::InvalidState(m) => Self::new(StatusCode::BAD_REQUEST, "invalid_state", m),
            ServiceError::Db(m) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", m),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            e if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.error_code(), e.to_string())
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            (ServiceError::not_found("store"), StatusCode::NOT_FOUND, "not_found"),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT, "conflict"),
            (ServiceError::InvalidState("x".into()), StatusCode::BAD_REQUEST, "invalid_state"),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
        ];
        for (err, status, code) in cases {
            let api = JsonApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.error, code);
        }
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        for (err, code) in [
            (AuthError::MissingToken, "authorization_required"),
            (AuthError::InvalidToken, "invalid_token"),
            (AuthError::TokenExpired, "invalid_token"),
            (AuthError::TokenRevoked, "invalid_revoked"),
            (AuthError::FreshTokenRequired, "fresh_token_required"),
            (AuthError::InvalidCredentials, "invalid_credentials"),
        ] {
            let api = JsonApiError::from(err);
            assert_eq!(api.status, StatusCode::UNAUTHORIZED);
            assert_eq!(api.error, code);
        }
        assert_eq!(JsonApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
    }
}
