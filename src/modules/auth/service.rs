use axum::http::StatusCode;
use tracing::{info, instrument, warn};

use studio_auth::create_token;
use studio_config::JwtConfig;
use studio_core::{AppError, hash_password, verify_password};
use studio_db::UserRepository;
use studio_models::{NewUser, User};
use studio_observability::{
    track_login_failure, track_login_success, track_token_issued, track_user_registered,
};

use super::model::{JwtResponse, LoginRequest, SignupRequest};

const BAD_CREDENTIALS: &str = "Bad credentials";

#[derive(Debug)]
pub enum Registration {
    Created(User),
    EmailTaken,
}

pub struct AuthService;

impl AuthService {
    /// Stores a new non-admin user unless the email is already registered.
    #[instrument(skip(users, dto), fields(email = %dto.email))]
    pub async fn register_user(
        users: &dyn UserRepository,
        dto: SignupRequest,
    ) -> Result<Registration, AppError> {
        if users.exists_by_email(&dto.email).await? {
            return Ok(Registration::EmailTaken);
        }

        let password_hash = hash_password(&dto.password)?;
        let created = users
            .create(NewUser {
                email: dto.email,
                first_name: dto.first_name,
                last_name: dto.last_name,
                password_hash,
                admin: false,
            })
            .await;

        // A concurrent signup can claim the email between the check and the insert.
        let user = match created {
            Ok(user) => user,
            Err(err) if err.status == StatusCode::BAD_REQUEST => {
                warn!("Email taken by a concurrent registration");
                return Ok(Registration::EmailTaken);
            }
            Err(err) => return Err(err),
        };

        track_user_registered();
        info!(user_id = user.id, "User registered");
        Ok(Registration::Created(user))
    }

    /// Checks the credentials and issues a bearer token.
    #[instrument(skip(users, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserRepository,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<JwtResponse, AppError> {
        let Some(user) = users.find_by_email(&dto.email).await? else {
            warn!("Login attempt for unknown email");
            track_login_failure("unknown_email");
            return Err(AppError::unauthorized(BAD_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            track_login_failure("wrong_password");
            return Err(AppError::unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let token = create_token(&user.email, jwt_config)?;
        track_token_issued();
        track_login_success();

        Ok(JwtResponse::bearer(
            token,
            user.id,
            user.email,
            user.first_name,
            user.last_name,
            user.admin,
        ))
    }
}
