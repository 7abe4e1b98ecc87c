//! HTTP error mapping.
//!
//! `NotFound` -> 404, undecodable body or invalid id -> 400, anything else ->
//! 500 with a generic message; the detail goes to the log only.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;
use staffdir_core::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("repository failure: {0}")]
    Repository(RepoError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Repository(_) => "REPOSITORY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepoError::Validation(validation) => Self::BadRequest(validation.to_string()),
            other => Self::Repository(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Repository(err) => {
                error!(
                    "event=http_error module=server status=error error_code={} error={}",
                    self.error_code(),
                    err
                );
                "internal server error".to_string()
            }
            Self::Internal(err) => {
                error!(
                    "event=http_error module=server status=error error_code={} error={}",
                    self.error_code(),
                    err
                );
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error_code": self.error_code(),
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use staffdir_core::{RepoError, ValidationError};

    #[test]
    fn repository_errors_map_to_boundary_statuses() {
        let not_found = ApiError::from(RepoError::NotFound {
            entity: "employee",
            id: "e1".to_string(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(RepoError::Validation(ValidationError::EmptyId));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let decode_source = serde_json::from_str::<u8>("x").unwrap_err();
        let decode = ApiError::from(RepoError::Decode {
            bucket: "Employees".to_string(),
            key: "e1".to_string(),
            source: decode_source,
        });
        assert_eq!(decode.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
