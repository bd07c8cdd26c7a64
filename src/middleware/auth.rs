use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use studio_auth::{username_from_token, validate_token};
use studio_core::EntityId;

use crate::state::AppState;

const UNAUTHORIZED_MESSAGE: &str = "Full authentication is required to access this resource";

/// Body of every `401` produced by the authentication filter.
#[derive(Debug, Serialize, ToSchema)]
pub struct UnauthorizedResponse {
    #[schema(example = 401)]
    pub status: u16,
    #[schema(example = "Unauthorized")]
    pub error: String,
    pub message: String,
    #[schema(example = "/api/session")]
    pub path: String,
}

/// Builds the entry-point response for an unauthenticated request.
pub fn unauthorized_response(path: &str, message: &str) -> Response {
    let body = UnauthorizedResponse {
        status: StatusCode::UNAUTHORIZED.as_u16(),
        error: "Unauthorized".to_string(),
        message: message.to_string(),
        path: path.to_string(),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// The authenticated principal, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: EntityId,
    pub email: String,
    pub admin: bool,
}

fn request_path(req: &Request) -> String {
    // Nested routers see a stripped URI; report the one the client sent.
    req.extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<AuthUser> {
    let token = bearer_token(headers)?;
    if !validate_token(token, &state.jwt_config) {
        return None;
    }

    let email = username_from_token(token, &state.jwt_config).ok()?;
    match state.users.find_by_email(&email).await {
        Ok(Some(user)) => Some(AuthUser {
            id: user.id,
            email: user.email,
            admin: user.admin,
        }),
        Ok(None) => {
            warn!(email = %email, "Token subject no longer matches a user");
            None
        }
        Err(e) => {
            error!("Cannot set user authentication: {}", e);
            None
        }
    }
}

/// Rejects requests without a valid bearer token for an existing user.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate(&state, req.headers()).await {
        Some(auth_user) => {
            req.extensions_mut().insert(auth_user);
            next.run(req).await
        }
        None => {
            let path = request_path(&req);
            warn!(path = %path, "Unauthorized error: {}", UNAUTHORIZED_MESSAGE);
            unauthorized_response(&path, UNAUTHORIZED_MESSAGE)
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            let path = parts
                .extensions
                .get::<OriginalUri>()
                .map(|uri| uri.path().to_string())
                .unwrap_or_else(|| parts.uri.path().to_string());
            unauthorized_response(&path, UNAUTHORIZED_MESSAGE)
        })
    }
}
