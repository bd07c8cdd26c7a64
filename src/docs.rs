use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use studio_core::ErrorResponse;

use crate::middleware::auth::UnauthorizedResponse;
use crate::modules::auth::model::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
use crate::modules::sessions::model::SessionDto;
use crate::modules::teachers::model::TeacherDto;
use crate::modules::users::model::UserDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::sessions::controller::get_session,
        crate::modules::sessions::controller::get_sessions,
        crate::modules::sessions::controller::create_session,
        crate::modules::sessions::controller::update_session,
        crate::modules::sessions::controller::delete_session,
        crate::modules::sessions::controller::participate,
        crate::modules::sessions::controller::no_longer_participate,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            JwtResponse,
            MessageResponse,
            SessionDto,
            TeacherDto,
            UserDto,
            ErrorResponse,
            UnauthorizedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Sessions", description = "Yoga sessions and participation"),
        (name = "Teachers", description = "Studio teachers"),
        (name = "Users", description = "User accounts")
    ),
    info(
        title = "Studio API",
        version = "0.1.0",
        description = "Session booking for a yoga studio, built with Rust, Axum and PostgreSQL with JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
