//! Unified application error types for EventHub.
//!
//! Infrastructure faults are carried by [`AppError`]. The registration core
//! returns its own typed outcomes ([`CapacityError`], [`RegisterError`],
//! [`CancelError`]) so callers can tell terminal business outcomes apart
//! from store faults.

use std::fmt;
use thiserror::Error;

use crate::types::id::{EventId, UserId};

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// The caller did not present a verified identity.
    Unauthorized,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, exhausted capacity, etc.).
    Conflict,
    /// A stored invariant was found violated.
    Inconsistent,
    /// Retryable store contention (serialization failure, deadlock).
    Transient,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Inconsistent => write!(f, "INCONSISTENT"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout EventHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an invariant-violation error.
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Inconsistent, message)
    }

    /// Create a retryable contention error.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transient, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Whether the operation that produced this error may be retried as-is.
    pub fn is_transient(&self) -> bool {
        self.kind == ErrorKind::Transient
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

// ── Registration core outcomes ───────────────────────────────────────

/// Failure of a seat ledger operation.
#[derive(Debug, Error)]
pub enum CapacityError {
    /// No event with this id exists.
    #[error("event {0} not found")]
    NotFound(EventId),
    /// The event has no seats left.
    #[error("event {0} is sold out")]
    SoldOut(EventId),
    /// A release would push available seats above capacity.
    #[error("releasing a seat on event {event_id} would exceed its capacity of {capacity}")]
    Inconsistent {
        /// Event whose ledger is out of balance.
        event_id: EventId,
        /// The event's fixed capacity.
        capacity: u32,
    },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

/// Failure of a `register` request.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// No event with this id exists.
    #[error("event {0} not found")]
    EventNotFound(EventId),
    /// The user already holds a registration for the event.
    #[error("user {user_id} is already registered for event {event_id}")]
    AlreadyRegistered {
        /// Registering user.
        user_id: UserId,
        /// Target event.
        event_id: EventId,
    },
    /// The event has no seats left.
    #[error("event {0} is sold out")]
    SoldOut(EventId),
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl RegisterError {
    /// Whether the failure came from retryable store contention.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_transient())
    }
}

impl From<CapacityError> for RegisterError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::NotFound(id) => Self::EventNotFound(id),
            CapacityError::SoldOut(id) => Self::SoldOut(id),
            CapacityError::Inconsistent { .. } => Self::Store(AppError::inconsistent(err.to_string())),
            CapacityError::Store(e) => Self::Store(e),
        }
    }
}

/// Failure of a `cancel` request.
#[derive(Debug, Error)]
pub enum CancelError {
    /// The user holds no registration for the event.
    #[error("user {user_id} is not registered for event {event_id}")]
    NotRegistered {
        /// Cancelling user.
        user_id: UserId,
        /// Target event.
        event_id: EventId,
    },
    /// Restoring the seat would exceed capacity; the cancellation was rolled back.
    #[error("cancelling on event {event_id} would exceed its capacity of {capacity}")]
    Inconsistent {
        /// Event whose ledger is out of balance.
        event_id: EventId,
        /// The event's fixed capacity.
        capacity: u32,
    },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl CancelError {
    /// Whether the failure came from retryable store contention.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_transient())
    }
}

impl From<CapacityError> for CancelError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::Inconsistent { event_id, capacity } => {
                Self::Inconsistent { event_id, capacity }
            }
            // A live registration pins its event, so a missing event here is a broken ledger.
            CapacityError::NotFound(_) | CapacityError::SoldOut(_) => {
                Self::Store(AppError::inconsistent(err.to_string()))
            }
            CapacityError::Store(e) => Self::Store(e),
        }
    }
}

impl From<CapacityError> for AppError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::NotFound(_) => AppError::not_found(err.to_string()),
            CapacityError::SoldOut(_) => AppError::conflict(err.to_string()),
            CapacityError::Inconsistent { .. } => AppError::inconsistent(err.to_string()),
            CapacityError::Store(e) => e,
        }
    }
}

impl From<RegisterError> for AppError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::EventNotFound(_) => AppError::not_found(err.to_string()),
            RegisterError::AlreadyRegistered { .. } | RegisterError::SoldOut(_) => {
                AppError::conflict(err.to_string())
            }
            RegisterError::Store(e) => e,
        }
    }
}

impl From<CancelError> for AppError {
    fn from(err: CancelError) -> Self {
        match err {
            CancelError::NotRegistered { .. } => AppError::not_found(err.to_string()),
            CancelError::Inconsistent { .. } => AppError::inconsistent(err.to_string()),
            CancelError::Store(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_maps_into_register_error() {
        let event_id = EventId::new();
        assert!(matches!(
            RegisterError::from(CapacityError::SoldOut(event_id)),
            RegisterError::SoldOut(id) if id == event_id
        ));
        assert!(matches!(
            RegisterError::from(CapacityError::NotFound(event_id)),
            RegisterError::EventNotFound(id) if id == event_id
        ));
    }

    #[test]
    fn test_inconsistent_release_maps_into_cancel_error() {
        let event_id = EventId::new();
        let err = CancelError::from(CapacityError::Inconsistent {
            event_id,
            capacity: 3,
        });
        assert!(matches!(err, CancelError::Inconsistent { capacity: 3, .. }));
        assert_eq!(AppError::from(err).kind, ErrorKind::Inconsistent);
    }

    #[test]
    fn test_transient_detection() {
        let err = RegisterError::Store(AppError::transient("serialization failure"));
        assert!(err.is_transient());
        assert!(!RegisterError::SoldOut(EventId::new()).is_transient());
        assert!(!CancelError::Store(AppError::database("boom")).is_transient());
    }

    #[test]
    fn test_app_error_kind_for_business_outcomes() {
        let user_id = UserId::new();
        let event_id = EventId::new();
        let already = AppError::from(RegisterError::AlreadyRegistered { user_id, event_id });
        assert_eq!(already.kind, ErrorKind::Conflict);
        let missing = AppError::from(CancelError::NotRegistered { user_id, event_id });
        assert_eq!(missing.kind, ErrorKind::NotFound);
    }
}
