//! HTTP error type and conversions from service errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::application::services::KvError;
use crate::domain::TrackingError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Unavailable { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Unavailable { message, details } => ("unavailable", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(errors))
    }
}

impl From<TrackingError> for AppError {
    fn from(e: TrackingError) -> Self {
        match &e {
            TrackingError::NotFound(sno) => {
                AppError::not_found("Tracking number not found", json!({ "sno": sno }))
            }
            TrackingError::Store { step, .. } if e.is_timeout() => {
                tracing::error!(error = %e, "Tracking lookup timed out");
                AppError::unavailable(
                    "Tracking store timed out",
                    json!({ "step": step.to_string() }),
                )
            }
            TrackingError::Store { step, .. } => {
                tracing::error!(error = %e, "Tracking lookup failed");
                AppError::internal("Database error", json!({ "step": step.to_string() }))
            }
            TrackingError::Serialization { sno, op, .. } => {
                tracing::error!(error = %e, "Tracking record serialization failed");
                AppError::internal(
                    "Tracking record could not be processed",
                    json!({ "reason": "cache_payload", "operation": op.to_string(), "sno": sno }),
                )
            }
        }
    }
}

impl From<KvError> for AppError {
    fn from(e: KvError) -> Self {
        match e {
            KvError::InvalidKey(key) => AppError::bad_request("Invalid key", json!({ "key": key })),
            KvError::ValueTooLarge { size, max } => AppError::bad_request(
                "Value too large",
                json!({ "size": size, "max": max }),
            ),
            KvError::InvalidTtl { seconds, max } => AppError::bad_request(
                "ttl_seconds out of range",
                json!({ "ttl_seconds": seconds, "min": 1, "max": max }),
            ),
            KvError::NotUtf8(key) => {
                AppError::internal("Stored value is not valid UTF-8", json!({ "key": key }))
            }
            KvError::Backend(err) => {
                tracing::error!(error = %err, "Key-value backend failure");
                AppError::unavailable("Key-value store unavailable", json!({}))
            }
        }
    }
}
