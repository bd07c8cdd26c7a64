use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use studio_core::{AppError, ErrorResponse, parse_id};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{SessionDto, SessionInput};
use super::service::SessionService;

fn session_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Session not found"))
}

#[utoipa::path(
    get,
    path = "/api/session/{id}",
    params(
        ("id" = i64, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session details", body = SessionDto),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDto>, AppError> {
    let id = parse_id(&id)?;
    let session = SessionService::get_by_id(state.sessions.as_ref(), id)
        .await?
        .ok_or_else(session_not_found)?;
    Ok(Json(session.into()))
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "All sessions ordered by id", body = Vec<SessionDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_sessions(State(state): State<AppState>) -> Result<Json<Vec<SessionDto>>, AppError> {
    let sessions = SessionService::find_all(state.sessions.as_ref()).await?;
    Ok(Json(sessions.into_iter().map(SessionDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/session",
    request_body = SessionDto,
    responses(
        (status = 200, description = "Session created", body = SessionDto),
        (status = 400, description = "Invalid body or unknown teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(name = %dto.name))]
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SessionDto>,
) -> Result<Json<SessionDto>, AppError> {
    let session = SessionService::create(
        state.sessions.as_ref(),
        state.teachers.as_ref(),
        SessionInput::from(dto),
    )
    .await?;
    Ok(Json(session.into()))
}

#[utoipa::path(
    put,
    path = "/api/session/{id}",
    params(
        ("id" = i64, Path, description = "Session ID")
    ),
    request_body = SessionDto,
    responses(
        (status = 200, description = "Session updated", body = SessionDto),
        (status = 400, description = "Malformed id, invalid body or unknown teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<SessionDto>,
) -> Result<Json<SessionDto>, AppError> {
    let id = parse_id(&id)?;
    let session = SessionService::update(
        state.sessions.as_ref(),
        state.teachers.as_ref(),
        id,
        SessionInput::from(dto),
    )
    .await?
    .ok_or_else(session_not_found)?;
    Ok(Json(session.into()))
}

#[utoipa::path(
    delete,
    path = "/api/session/{id}",
    params(
        ("id" = i64, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    SessionService::delete(state.sessions.as_ref(), id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/session/{id}/participate/{user_id}",
    params(
        ("id" = i64, Path, description = "Session ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User added to the session"),
        (status = 400, description = "Malformed id or already participating", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session or user not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let user_id = parse_id(&user_id)?;
    SessionService::participate(state.sessions.as_ref(), state.users.as_ref(), id, user_id)
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/session/{id}/participate/{user_id}",
    params(
        ("id" = i64, Path, description = "Session ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed from the session"),
        (status = 400, description = "Malformed id or not participating", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn no_longer_participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let user_id = parse_id(&user_id)?;
    SessionService::no_longer_participate(state.sessions.as_ref(), id, user_id).await?;
    Ok(StatusCode::OK)
}
