use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gof_core::CoreError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dto::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid {distribution} parameters: {message}")]
    InvalidParameters {
        distribution: String,
        message: String,
    },

    #[error("{0}")]
    UnsupportedDistribution(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(format!("Validation failed: {}", errors))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidParameter {
                distribution,
                message,
            } => ApiError::InvalidParameters {
                distribution,
                message,
            },
            CoreError::UnsupportedType(message) => ApiError::UnsupportedDistribution(message),
            CoreError::Validation(message) => ApiError::Validation(message),
            CoreError::DegenerateInput(message) => ApiError::BadRequest(message),
            other @ (CoreError::ZeroMass(_) | CoreError::Computation(_)) => {
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation error".to_string(), Some(msg.clone())),
            ApiError::InvalidParameters {
                distribution,
                message,
            } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} parameters", distribution),
                Some(message.clone()),
            ),
            ApiError::UnsupportedDistribution(msg) => (
                StatusCode::BAD_REQUEST,
                "Unsupported distribution type".to_string(),
                Some(msg.clone()),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request".to_string(), Some(msg.clone())),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), Some(err.clone()))
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
