//! # REST API for Students
//!
//! Listing, creating and fetching students with their payment history.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateStudentRequest, Student};
use tracing::info;

use super::error::ApiResult;
use super::mappers::StudentMapper;
use crate::domain::validation::parse_record_id;
use crate::AppState;

/// List all students with their payments
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    info!("GET /api/students");

    let students = state.student_service.list_students().await?;
    Ok(Json(students.into_iter().map(StudentMapper::to_dto).collect()))
}

/// Create a new student
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!("POST /api/students - request: {:?}", request);

    let student = state
        .student_service
        .create_student(StudentMapper::to_create_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(StudentMapper::to_dto(student))))
}

/// Get a student by ID
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Student>> {
    info!("GET /api/students/{}", student_id);

    let student_id = parse_record_id(&student_id, "student")?;
    let student = state.student_service.get_student(student_id).await?;
    Ok(Json(StudentMapper::to_dto(student)))
}
