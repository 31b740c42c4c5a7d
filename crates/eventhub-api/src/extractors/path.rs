//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use eventhub_core::types::EventId;

use crate::error::ApiError;

/// Parses an event id from a path segment.
pub fn parse_event_id(s: &str) -> Result<EventId, ApiError> {
    s.parse::<EventId>()
        .map_err(|_| ApiError::validation(format!("Invalid event id: {s}")))
}

/// The `{id}` segment of an event route, parsed as an [`EventId`].
#[derive(Debug, Clone, Copy)]
pub struct EventPath(pub EventId);

impl<S: Send + Sync> FromRequestParts<S> for EventPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;
        parse_event_id(&raw).map(EventPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_id() {
        let id = EventId::new();
        assert_eq!(parse_event_id(&id.to_string()).unwrap(), id);

        let err = parse_event_id("42").unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }
}
