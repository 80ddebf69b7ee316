//! Application error handling
//!
//! Converts calculation errors and routing failures into JSON error
//! responses of the form `{"error": {"code", "message", "field"}}`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitness_rpg_shared::errors::CalcError;
use fitness_rpg_shared::types::{ErrorDetail, ErrorResponse};
use fitness_rpg_shared::validation::user_message;
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            ApiError::Calc(err) => match err {
                CalcError::Validation { field, .. } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    user_message(err),
                    Some(field.clone()),
                ),
                CalcError::NotComputable { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NOT_COMPUTABLE",
                    err.to_string(),
                    None,
                ),
                CalcError::UnrecognizedCategory { .. } => (
                    StatusCode::BAD_REQUEST,
                    "UNRECOGNIZED_CATEGORY",
                    err.to_string(),
                    None,
                ),
            },
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = self.parts();

        match &self {
            ApiError::Internal(err) => error!("Internal error: {:?}", err),
            ApiError::Calc(err) => warn!(code, "Rejected request: {}", err),
            ApiError::NotFound(_) | ApiError::BadRequest(_) => {}
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
