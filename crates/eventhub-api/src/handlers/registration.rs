//! Registration, cancellation and "my registrations" handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use eventhub_entity::{Registration, RegistrationDetail};

use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, EventPath};
use crate::state::AppState;

/// POST /api/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> Result<(StatusCode, Json<ApiResponse<Registration>>), ApiError> {
    let registration = state
        .registration_service
        .register(auth.context(), event_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(registration))))
}

/// DELETE /api/events/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .registration_service
        .cancel(auth.context(), event_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Registration cancelled",
    ))))
}

/// GET /api/events/user/me
pub async fn my_registrations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<RegistrationDetail>>>, ApiError> {
    let registrations = state
        .registration_service
        .list_for_user(auth.context())
        .await?;
    Ok(Json(ApiResponse::ok(registrations)))
}
