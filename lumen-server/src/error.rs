//! Error responses of the HTTP surface

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lumen_core::auth::AuthError;
use lumen_core::generation::GenerationError;
use serde_json::json;

/// Error rendered as `{"detail": message}` with its status
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, err.to_string())
    }
}

// Malformed or mistyped bodies are validation failures, not 400/415
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::protocol::RequestError;
    use lumen_core::providers::ProviderError;

    #[test]
    fn test_generation_error_statuses() {
        let upstream = ApiError::from(GenerationError::from(ProviderError::upstream(
            429,
            "slow down",
        )));
        assert_eq!(upstream.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(upstream.detail, "slow down");

        let missing = ApiError::from(GenerationError::from(ProviderError::no_providers()));
        assert_eq!(missing.status, StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ApiError::from(GenerationError::from(RequestError::EmptyPrompt));
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        let err = ApiError::from(AuthError::InvalidToken("Google public key not found".into()));
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.detail, "Google public key not found");
    }
}
