//! Event lookup handler.

use axum::Json;
use axum::extract::State;

use eventhub_entity::Event;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::extractors::EventPath;
use crate::state::AppState;

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    EventPath(event_id): EventPath,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state.event_service.get(event_id).await?;
    Ok(Json(ApiResponse::ok(event)))
}
