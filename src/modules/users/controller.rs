use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{instrument, warn};

use studio_core::{AppError, ErrorResponse, parse_id};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::model::UserDto;
use super::service::UserService;

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, AppError> {
    let id = parse_id(&id)?;
    let user = UserService::find_by_id(state.users.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;
    Ok(Json(user.into()))
}

/// Delete your own account
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized or not the account owner"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(auth_user_id = auth_user.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let user = UserService::find_by_id(state.users.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

    if user.email != auth_user.email {
        warn!(target_user_id = id, "Attempt to delete another user's account");
        return Err(AppError::unauthorized(
            "You can only delete your own account".to_string(),
        ));
    }

    UserService::delete(state.users.as_ref(), id).await?;
    Ok(StatusCode::OK)
}
