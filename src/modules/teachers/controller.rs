use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use studio_core::{AppError, ErrorResponse, parse_id};

use crate::state::AppState;

use super::model::TeacherDto;
use super::service::TeacherService;

#[utoipa::path(
    get,
    path = "/api/teacher",
    responses(
        (status = 200, description = "All teachers ordered by id", body = Vec<TeacherDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teachers(State(state): State<AppState>) -> Result<Json<Vec<TeacherDto>>, AppError> {
    let teachers = TeacherService::find_all(state.teachers.as_ref()).await?;
    Ok(Json(teachers.into_iter().map(TeacherDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/teacher/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = TeacherDto),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeacherDto>, AppError> {
    let id = parse_id(&id)?;
    let teacher = TeacherService::find_by_id(state.teachers.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;
    Ok(Json(teacher.into()))
}
