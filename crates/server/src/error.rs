use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::ServiceError;
use log::{error, warn};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. `CONFLICT`
    #[schema(value_type = String)]
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            ServiceError::BadRequest(msg) => Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "CONFLICT", msg),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ServiceError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            ServiceError::Retryable(ref cause) => {
                warn!("Gave up on a concurrently modified schedule: {cause}");
                Self::new(StatusCode::CONFLICT, "CONFLICT", err.to_string())
            }
            ServiceError::Internal(cause) => {
                error!("Database error: {cause}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
