use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use studio_core::{AppError, ErrorResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
use super::service::{AuthService, Registration};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Validation error or email already taken", body = MessageResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    match AuthService::register_user(state.users.as_ref(), dto).await? {
        Registration::Created(_) => Ok((
            StatusCode::OK,
            Json(MessageResponse::new("User registered successfully!")),
        )),
        Registration::EmailTaken => Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Error: Email is already taken!")),
        )),
    }
}

/// Login and receive a JWT
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = JwtResponse),
        (status = 400, description = "Blank email or password", body = ErrorResponse),
        (status = 401, description = "Bad credentials", body = ErrorResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<JwtResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), &state.jwt_config, dto).await?;
    Ok(Json(response))
}
