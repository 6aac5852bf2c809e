//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// One field-scoped rejection: which field failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// One or more fields failed a shape check (format, pattern, presence).
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// The entity's own fields contradict each other.
    #[error("{message}")]
    SelfConflict {
        field: &'static str,
        message: String,
    },
    /// The candidate conflicts with an already persisted record.
    #[error("{message}")]
    DuplicateKey {
        field: &'static str,
        message: String,
    },
    /// The candidate names a related record that does not exist.
    #[error("{message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Per-field messages for field-scoped rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

fn single_field(field: &str, message: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert(field.to_string(), message.to_string());
    map
}

fn field_map(errors: &[FieldError]) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|e| (e.field.to_string(), e.message.clone()))
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, fields) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(field_map(errors)),
            ),
            AppError::SelfConflict { field, message } => (
                StatusCode::BAD_REQUEST,
                "self_conflict",
                Some(single_field(field, message)),
            ),
            AppError::DuplicateKey { field, message } => (
                StatusCode::CONFLICT,
                "duplicate_key",
                Some(single_field(field, message)),
            ),
            AppError::InvalidReference { field, message } => (
                StatusCode::BAD_REQUEST,
                "invalid_reference",
                Some(single_field(field, message)),
            ),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
        };
        // Internal detail stays in the log; the caller only sees a generic message.
        let message = match &self {
            AppError::Db(_) => "unexpected error".to_string(),
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                fields,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_field_map() {
        let err = AppError::Validation(vec![
            FieldError::new("number", "must be 5 characters"),
            FieldError::new("destination", "must be 3 characters"),
        ]);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn self_conflict_maps_to_400() {
        let err = AppError::SelfConflict {
            field: "destination",
            message: "destination must differ from the point of departure".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_key_maps_to_409() {
        let err = AppError::DuplicateKey {
            field: "number",
            message: "flight number AB123 already exists".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404_and_db_to_500() {
        assert_eq!(
            AppError::NotFound("no flight with id 9".into())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Db(sqlx::Error::PoolClosed).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn duplicate_key_body_carries_the_offending_field() {
        let err = AppError::DuplicateKey {
            field: "email",
            message: "that email is already used".into(),
        };
        let resp = err.into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), 4096).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "duplicate_key");
        assert_eq!(body["error"]["fields"]["email"], "that email is already used");
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_detail() {
        let err = AppError::Db(sqlx::Error::Protocol("secret internals".into()));
        let resp = err.into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), 4096).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "unexpected error");
    }
}
