//! HTTP mapping for domain errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use saahaz_core::error::{ErrorClass, SaahazError};
use serde::Serialize;
use tracing::error;

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper that turns a [`SaahazError`] into a JSON error response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub SaahazError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

fn status_and_code(class: ErrorClass) -> (StatusCode, &'static str) {
    match class {
        ErrorClass::Authentication => (StatusCode::UNAUTHORIZED, "unauthorized"),
        ErrorClass::Authorization => (StatusCode::FORBIDDEN, "forbidden"),
        ErrorClass::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorClass::Validation => (StatusCode::BAD_REQUEST, "validation_error"),
        ErrorClass::Conflict => (StatusCode::CONFLICT, "conflict"),
        ErrorClass::Upstream => (StatusCode::BAD_GATEWAY, "upstream_error"),
        ErrorClass::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let class = self.0.class();
        let (status, code) = status_and_code(class);

        let message = if class == ErrorClass::Internal {
            error!(error = %self.0, "Request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { error: code, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: SaahazError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn classes_map_to_statuses() {
        assert_eq!(status_of(SaahazError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(SaahazError::InvalidToken("bad".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(SaahazError::Forbidden {
                reason: "admin".into()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(SaahazError::ProductNotFound { id: "x".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(SaahazError::validation("nope")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(SaahazError::DuplicateEmail {
                email: "a@b".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SaahazError::ExternalVerification("down".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(SaahazError::Database("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
