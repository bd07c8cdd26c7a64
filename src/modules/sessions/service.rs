use anyhow::anyhow;
use tracing::{info, instrument};

use studio_core::{AppError, EntityId};
use studio_db::{SessionRepository, TeacherRepository, UserRepository};
use studio_observability::track_participation;

use super::model::{Session, SessionInput};

pub struct SessionService;

impl SessionService {
    async fn ensure_teacher_exists(
        teachers: &dyn TeacherRepository,
        teacher_id: EntityId,
    ) -> Result<(), AppError> {
        if teachers.find_by_id(teacher_id).await?.is_none() {
            return Err(AppError::bad_request(anyhow!(
                "Teacher {} does not exist",
                teacher_id
            )));
        }
        Ok(())
    }

    #[instrument(skip(sessions))]
    pub async fn find_all(sessions: &dyn SessionRepository) -> Result<Vec<Session>, AppError> {
        sessions.find_all().await
    }

    #[instrument(skip(sessions))]
    pub async fn get_by_id(
        sessions: &dyn SessionRepository,
        id: EntityId,
    ) -> Result<Option<Session>, AppError> {
        sessions.find_by_id(id).await
    }

    #[instrument(skip(sessions, teachers, input), fields(name = %input.name))]
    pub async fn create(
        sessions: &dyn SessionRepository,
        teachers: &dyn TeacherRepository,
        input: SessionInput,
    ) -> Result<Session, AppError> {
        Self::ensure_teacher_exists(teachers, input.teacher_id).await?;
        let session = sessions.create(input).await?;
        info!(session_id = session.id, "Session created");
        Ok(session)
    }

    /// Returns `None` when no session has this id.
    #[instrument(skip(sessions, teachers, input))]
    pub async fn update(
        sessions: &dyn SessionRepository,
        teachers: &dyn TeacherRepository,
        id: EntityId,
        input: SessionInput,
    ) -> Result<Option<Session>, AppError> {
        if sessions.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        Self::ensure_teacher_exists(teachers, input.teacher_id).await?;
        sessions.update(id, input).await
    }

    #[instrument(skip(sessions))]
    pub async fn delete(sessions: &dyn SessionRepository, id: EntityId) -> Result<(), AppError> {
        if !sessions.delete(id).await? {
            return Err(AppError::not_found(anyhow!("Session not found")));
        }
        info!(session_id = id, "Session deleted");
        Ok(())
    }

    #[instrument(skip(sessions, users))]
    pub async fn participate(
        sessions: &dyn SessionRepository,
        users: &dyn UserRepository,
        id: EntityId,
        user_id: EntityId,
    ) -> Result<(), AppError> {
        let session = sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Session not found")))?;
        if users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("User not found")));
        }
        if session.has_participant(user_id) {
            return Err(AppError::bad_request(anyhow!(
                "User already participates in this session"
            )));
        }

        sessions.add_participant(id, user_id).await?;
        track_participation("added");
        Ok(())
    }

    #[instrument(skip(sessions))]
    pub async fn no_longer_participate(
        sessions: &dyn SessionRepository,
        id: EntityId,
        user_id: EntityId,
    ) -> Result<(), AppError> {
        let session = sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Session not found")))?;
        if !session.has_participant(user_id) {
            return Err(AppError::bad_request(anyhow!(
                "User does not participate in this session"
            )));
        }

        sessions.remove_participant(id, user_id).await?;
        track_participation("removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use studio_db::Repositories;
    use studio_models::{NewTeacher, NewUser, User};

    struct Fixture {
        repos: Repositories,
        teacher_id: EntityId,
        user: User,
    }

    async fn fixture() -> Fixture {
        let repos = Repositories::in_memory();
        let teacher = repos
            .teachers
            .create(NewTeacher {
                first_name: "Margot".to_string(),
                last_name: "Delahaye".to_string(),
            })
            .await
            .unwrap();
        let user = repos
            .users
            .create(NewUser {
                email: "toto@toto.com".to_string(),
                first_name: "Toto".to_string(),
                last_name: "Toto".to_string(),
                password_hash: "hash".to_string(),
                admin: false,
            })
            .await
            .unwrap();
        Fixture {
            repos,
            teacher_id: teacher.id,
            user,
        }
    }

    fn input(teacher_id: EntityId) -> SessionInput {
        SessionInput {
            name: "Morning flow".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 20)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .unwrap(),
            description: "Gentle vinyasa".to_string(),
            teacher_id,
            users: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_teacher() {
        let f = fixture().await;
        let sessions = f.repos.sessions.as_ref();
        let teachers = f.repos.teachers.as_ref();

        let err = SessionService::create(sessions, teachers, input(999))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);

        let session = SessionService::create(sessions, teachers, input(f.teacher_id))
            .await
            .unwrap();
        assert_eq!(session.teacher_id, Some(f.teacher_id));
        assert!(session.users.is_empty());
        assert_eq!(SessionService::find_all(sessions).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_session() {
        let f = fixture().await;
        let updated = SessionService::update(
            f.repos.sessions.as_ref(),
            f.repos.teachers.as_ref(),
            42,
            input(f.teacher_id),
        )
        .await
        .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_participate_rules() {
        let f = fixture().await;
        let sessions = f.repos.sessions.as_ref();
        let users = f.repos.users.as_ref();
        let session = SessionService::create(sessions, f.repos.teachers.as_ref(), input(f.teacher_id))
            .await
            .unwrap();

        let missing_session = SessionService::participate(sessions, users, 999, f.user.id)
            .await
            .unwrap_err();
        assert!(missing_session.is_not_found());

        let missing_user = SessionService::participate(sessions, users, session.id, 999)
            .await
            .unwrap_err();
        assert!(missing_user.is_not_found());

        SessionService::participate(sessions, users, session.id, f.user.id)
            .await
            .unwrap();
        let stored = SessionService::get_by_id(sessions, session.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.users, vec![f.user.id]);

        let twice = SessionService::participate(sessions, users, session.id, f.user.id)
            .await
            .unwrap_err();
        assert_eq!(twice.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_no_longer_participate_rules() {
        let f = fixture().await;
        let sessions = f.repos.sessions.as_ref();
        let session = SessionService::create(sessions, f.repos.teachers.as_ref(), input(f.teacher_id))
            .await
            .unwrap();

        let missing_session = SessionService::no_longer_participate(sessions, 999, f.user.id)
            .await
            .unwrap_err();
        assert!(missing_session.is_not_found());

        let not_participating =
            SessionService::no_longer_participate(sessions, session.id, f.user.id)
                .await
                .unwrap_err();
        assert_eq!(not_participating.status.as_u16(), 400);

        SessionService::participate(sessions, f.repos.users.as_ref(), session.id, f.user.id)
            .await
            .unwrap();
        SessionService::no_longer_participate(sessions, session.id, f.user.id)
            .await
            .unwrap();
        let stored = SessionService::get_by_id(sessions, session.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.users.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let f = fixture().await;
        let sessions = f.repos.sessions.as_ref();
        let session = SessionService::create(sessions, f.repos.teachers.as_ref(), input(f.teacher_id))
            .await
            .unwrap();

        SessionService::delete(sessions, session.id).await.unwrap();
        assert!(SessionService::get_by_id(sessions, session.id).await.unwrap().is_none());
        assert!(SessionService::delete(sessions, session.id).await.unwrap_err().is_not_found());
    }
}
