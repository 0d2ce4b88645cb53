//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use curator_core::error::DomainError;
use curator_shared::ItemId;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid apps: {0:?}")]
    InvalidApps(Vec<ItemId>),

    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::SessionNotFound => ApiError::NotFound(e.to_string()),
            DomainError::EmptySelection => ApiError::Validation(e.to_string()),
            DomainError::UnknownItems(ids) => ApiError::InvalidApps(ids),
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::UpstreamUnavailable(msg) => ApiError::Upstream(msg),
            DomainError::CorruptPayload(_)
            | DomainError::RenderError(_)
            | DomainError::ConfigError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ApiResponse::<()>::error("SESSION_NOT_FOUND", &msg),
                )
            }
            ApiError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::<()>::error("VALIDATION_ERROR", &msg),
                )
            }
            ApiError::InvalidApps(ids) => {
                tracing::warn!("Invalid apps selected: {:?}", ids);
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::<()>::error_with_details(
                        "INVALID_APPS",
                        "Invalid apps selected",
                        Some(json!({ "invalid_ids": ids })),
                    ),
                )
            }
            ApiError::Upstream(msg) => {
                tracing::error!("Upstream unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiResponse::<()>::error("UPSTREAM_UNAVAILABLE", "Service temporarily unavailable"),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::error("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::SessionNotFound, StatusCode::NOT_FOUND),
            (DomainError::EmptySelection, StatusCode::BAD_REQUEST),
            (DomainError::UnknownItems(vec![9]), StatusCode::BAD_REQUEST),
            (DomainError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::UpstreamUnavailable("redis".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::CorruptPayload("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::RenderError("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
