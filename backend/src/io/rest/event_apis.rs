//! # REST API for Events

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{Event, EventRequest};
use tracing::info;

use super::error::ApiResult;
use super::mappers::EventMapper;
use crate::domain::validation::parse_record_id;
use crate::AppState;

pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    info!("GET /api/events");

    let events = state.event_service.list_events().await?;
    Ok(Json(events.into_iter().map(EventMapper::to_dto).collect()))
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!("POST /api/events - request: {:?}", request);

    let event = state
        .event_service
        .create_event(EventMapper::to_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(EventMapper::to_dto(event))))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiResult<Json<Event>> {
    let Json(request) = payload?;
    info!("PUT /api/events/{} - request: {:?}", event_id, request);

    let event_id = parse_record_id(&event_id, "event")?;
    let event = state
        .event_service
        .update_event(event_id, EventMapper::to_command(request))
        .await?;
    Ok(Json(EventMapper::to_dto(event)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/events/{}", event_id);

    let event_id = parse_record_id(&event_id, "event")?;
    state.event_service.delete_event(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
