use std::sync::Arc;

use studio_config::{CorsConfig, JwtConfig, RateLimitConfig};
use studio_db::{Repositories, SessionRepository, TeacherRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        Self {
            users: repositories.users,
            teachers: repositories.teachers,
            sessions: repositories.sessions,
            jwt_config,
            cors_config,
            rate_limit_config,
        }
    }

    /// State over the given repositories with configuration read from the environment.
    pub fn from_env(repositories: Repositories) -> Self {
        Self::new(
            repositories,
            JwtConfig::from_env(),
            CorsConfig::from_env(),
            RateLimitConfig::from_env(),
        )
    }
}
