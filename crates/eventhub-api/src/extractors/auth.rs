//! `AuthUser` extractor: reads the verified identity forwarded by the
//! authentication layer and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use eventhub_core::types::UserId;
use eventhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = state.config.auth.identity_header.as_str();

        let raw = parts
            .headers
            .get(header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::unauthorized(format!("Missing {header} header")))?;

        let user_id = raw
            .parse::<UserId>()
            .map_err(|_| ApiError::unauthorized(format!("Invalid {header} header")))?;

        Ok(AuthUser(RequestContext::new(user_id)))
    }
}
