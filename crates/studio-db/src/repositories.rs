//! Persistence seams used by the services.

use async_trait::async_trait;
use studio_core::{AppError, EntityId};
use studio_models::{NewTeacher, NewUser, Session, SessionInput, Teacher, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
    /// Fails with a bad request when the email is already registered.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    /// Deletes the user and their participations. Returns whether a row existed.
    async fn delete(&self, id: EntityId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// All teachers, ordered by id.
    async fn find_all(&self) -> Result<Vec<Teacher>, AppError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Teacher>, AppError>;
    async fn create(&self, teacher: NewTeacher) -> Result<Teacher, AppError>;
}

/// Session storage. Participant lists are always returned ascending.
///
/// When `SessionInput::users` is present, ids that match no user are dropped
/// and duplicates collapse to one participation.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// All sessions, ordered by id.
    async fn find_all(&self) -> Result<Vec<Session>, AppError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Session>, AppError>;
    async fn create(&self, input: SessionInput) -> Result<Session, AppError>;
    /// Returns `None` when no session has this id.
    async fn update(&self, id: EntityId, input: SessionInput)
    -> Result<Option<Session>, AppError>;
    async fn delete(&self, id: EntityId) -> Result<bool, AppError>;
    async fn add_participant(&self, session_id: EntityId, user_id: EntityId)
    -> Result<(), AppError>;
    /// Returns whether the participation existed.
    async fn remove_participant(
        &self,
        session_id: EntityId,
        user_id: EntityId,
    ) -> Result<bool, AppError>;
}
