//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use eventhub_core::error::{AppError, CancelError, CapacityError, ErrorKind, RegisterError};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Response status.
    pub status: StatusCode,
    /// Machine-readable error code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Creates an API error.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 401 for a missing or malformed identity.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    /// 400 for malformed input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    fn internal(err: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %err, "Internal server error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Inconsistent
            | ErrorKind::Transient
            | ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => return Self::internal(&err),
        };
        Self::new(status, code, err.message)
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::EventNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "EVENT_NOT_FOUND", err.to_string())
            }
            RegisterError::AlreadyRegistered { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "ALREADY_REGISTERED", err.to_string())
            }
            RegisterError::SoldOut(_) => {
                Self::new(StatusCode::BAD_REQUEST, "SOLD_OUT", err.to_string())
            }
            RegisterError::Store(e) => e.into(),
        }
    }
}

impl From<CancelError> for ApiError {
    fn from(err: CancelError) -> Self {
        match err {
            CancelError::NotRegistered { .. } => {
                Self::new(StatusCode::NOT_FOUND, "NOT_REGISTERED", err.to_string())
            }
            CancelError::Inconsistent { .. } => Self::internal(&err),
            CancelError::Store(e) => e.into(),
        }
    }
}

impl From<CapacityError> for ApiError {
    fn from(err: CapacityError) -> Self {
        AppError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            success: false,
            error: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use eventhub_core::types::{EventId, UserId};

    use super::*;

    #[test]
    fn test_register_outcomes() {
        let event_id = EventId::new();
        let user_id = UserId::new();

        let missing = ApiError::from(RegisterError::EventNotFound(event_id));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.code, "EVENT_NOT_FOUND");

        let dup = ApiError::from(RegisterError::AlreadyRegistered { user_id, event_id });
        assert_eq!(dup.status, StatusCode::BAD_REQUEST);
        assert_eq!(dup.code, "ALREADY_REGISTERED");

        let full = ApiError::from(RegisterError::SoldOut(event_id));
        assert_eq!(full.status, StatusCode::BAD_REQUEST);
        assert_eq!(full.code, "SOLD_OUT");
    }

    #[test]
    fn test_cancel_outcomes() {
        let event_id = EventId::new();
        let not_registered = ApiError::from(CancelError::NotRegistered {
            user_id: UserId::new(),
            event_id,
        });
        assert_eq!(not_registered.status, StatusCode::NOT_FOUND);
        assert_eq!(not_registered.code, "NOT_REGISTERED");

        let broken = ApiError::from(CancelError::Inconsistent {
            event_id,
            capacity: 4,
        });
        assert_eq!(broken.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(broken.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_store_faults_hide_details() {
        let err = ApiError::from(RegisterError::Store(AppError::transient(
            "could not serialize access due to concurrent update",
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");

        let unavailable = ApiError::from(AppError::service_unavailable("pool timed out"));
        assert_eq!(unavailable.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
