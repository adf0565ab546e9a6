//! # REST API for Monthly Payments

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use shared::Student;
use tracing::info;

use super::error::ApiResult;
use super::mappers::{PaymentUpdateBody, StudentMapper};
use crate::AppState;

/// Set a student's payment status for one month and return the refreshed student
pub async fn update_payment(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    payload: Result<Json<PaymentUpdateBody>, JsonRejection>,
) -> ApiResult<Json<Student>> {
    let Json(body) = payload?;
    info!("PUT /api/students/{}/payment - request: {:?}", student_id, body);

    let command = StudentMapper::to_payment_command(student_id, body);
    let student = state.payment_service.update_payment(command).await?;
    Ok(Json(StudentMapper::to_dto(student)))
}
