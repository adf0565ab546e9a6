//! # REST API for Notices

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{Notice, NoticeRequest};
use tracing::info;

use super::error::ApiResult;
use super::mappers::NoticeMapper;
use crate::domain::validation::parse_record_id;
use crate::AppState;

pub async fn list_notices(State(state): State<AppState>) -> ApiResult<Json<Vec<Notice>>> {
    info!("GET /api/notices");

    let notices = state.notice_service.list_notices().await?;
    Ok(Json(notices.into_iter().map(NoticeMapper::to_dto).collect()))
}

pub async fn create_notice(
    State(state): State<AppState>,
    payload: Result<Json<NoticeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!("POST /api/notices - request: {:?}", request);

    let notice = state
        .notice_service
        .create_notice(NoticeMapper::to_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(NoticeMapper::to_dto(notice))))
}

pub async fn update_notice(
    State(state): State<AppState>,
    Path(notice_id): Path<String>,
    payload: Result<Json<NoticeRequest>, JsonRejection>,
) -> ApiResult<Json<Notice>> {
    let Json(request) = payload?;
    info!("PUT /api/notices/{} - request: {:?}", notice_id, request);

    let notice_id = parse_record_id(&notice_id, "notice")?;
    let notice = state
        .notice_service
        .update_notice(notice_id, NoticeMapper::to_command(request))
        .await?;
    Ok(Json(NoticeMapper::to_dto(notice)))
}

pub async fn delete_notice(
    State(state): State<AppState>,
    Path(notice_id): Path<String>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/notices/{}", notice_id);

    let notice_id = parse_record_id(&notice_id, "notice")?;
    state.notice_service.delete_notice(notice_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
