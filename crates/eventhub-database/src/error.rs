//! Translation of sqlx failures into [`AppError`].

use eventhub_core::error::{AppError, ErrorKind};

/// SQLSTATE for `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE for `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

/// Whether a SQLSTATE marks contention that is safe to retry as a whole.
pub fn is_retryable_code(code: &str) -> bool {
    code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED
}

/// Map a sqlx error, marking serialization failures and deadlocks as transient.
pub fn map_sqlx(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let kind = match &e {
            sqlx::Error::Database(db) if db.code().is_some_and(|c| is_retryable_code(&c)) => {
                ErrorKind::Transient
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Database,
        };
        AppError::with_source(kind, format!("{context}: {e}"), e)
    }
}

/// Whether the error is a violation of a UNIQUE constraint.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
