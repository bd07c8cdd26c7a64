//! PostgreSQL implementations of the repository traits.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use studio_core::{AppError, EntityId};
use studio_models::{NewTeacher, NewUser, Session, SessionInput, Teacher, User};
use tracing::instrument;

use crate::repositories::{SessionRepository, TeacherRepository, UserRepository};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, password, admin, created_at, updated_at";

const SESSION_SELECT: &str = r#"
    SELECT s.id, s.name, s.date, s.description, s.teacher_id,
           COALESCE(
               array_agg(p.user_id ORDER BY p.user_id) FILTER (WHERE p.user_id IS NOT NULL),
               '{}'
           ) AS users,
           s.created_at, s.updated_at
    FROM sessions s
    LEFT JOIN participate p ON p.session_id = s.id
"#;

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO users (email, first_name, last_name, password, admin) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::bad_request(anyhow::anyhow!("Error: Email is already taken!"))
                } else {
                    AppError::database(e)
                }
            })
    }

    async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct PgTeacherRepository {
    pool: PgPool,
}

impl PgTeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    async fn find_all(&self) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT id, first_name, last_name, created_at, updated_at FROM teachers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(teachers)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Teacher>, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, first_name, last_name, created_at, updated_at FROM teachers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }

    async fn create(&self, teacher: NewTeacher) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (first_name, last_name) VALUES ($1, $2) \
             RETURNING id, first_name, last_name, created_at, updated_at",
        )
        .bind(&teacher.first_name)
        .bind(&teacher.last_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(teacher)
    }
}

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn fetch_session<'e, E>(executor: E, id: EntityId) -> Result<Option<Session>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("{SESSION_SELECT} WHERE s.id = $1 GROUP BY s.id");
    sqlx::query_as::<_, Session>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Inserts participations for the ids that match a user, ignoring repeats.
async fn insert_participants(
    tx: &mut Transaction<'_, Postgres>,
    session_id: EntityId,
    user_ids: &[EntityId],
) -> Result<(), sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO participate (user_id, session_id) \
         SELECT u.id, $1 FROM users u WHERE u.id = ANY($2) \
         ON CONFLICT DO NOTHING",
    )
    .bind(session_id)
    .bind(user_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_all(&self) -> Result<Vec<Session>, AppError> {
        let query = format!("{SESSION_SELECT} GROUP BY s.id ORDER BY s.id");
        let sessions = sqlx::query_as::<_, Session>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(sessions)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Session>, AppError> {
        Ok(fetch_session(&self.pool, id).await?)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: SessionInput) -> Result<Session, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: EntityId = sqlx::query_scalar(
            "INSERT INTO sessions (name, date, description, teacher_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.date)
        .bind(&input.description)
        .bind(input.teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(users) = &input.users {
            insert_participants(&mut tx, id, users).await?;
        }

        let session = fetch_session(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::internal_error(format!("Session {id} vanished after insert")))?;

        tx.commit().await?;
        Ok(session)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: EntityId,
        input: SessionInput,
    ) -> Result<Option<Session>, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE sessions \
             SET name = $1, date = $2, description = $3, teacher_id = $4, \
                 updated_at = (NOW() AT TIME ZONE 'UTC') \
             WHERE id = $5",
        )
        .bind(&input.name)
        .bind(input.date)
        .bind(&input.description)
        .bind(input.teacher_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(users) = &input.users {
            sqlx::query("DELETE FROM participate WHERE session_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_participants(&mut tx, id, users).await?;
        }

        let session = fetch_session(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(session)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_participant(
        &self,
        session_id: EntityId,
        user_id: EntityId,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO participate (user_id, session_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(session_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_participant(
        &self,
        session_id: EntityId,
        user_id: EntityId,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM participate WHERE user_id = $1 AND session_id = $2")
            .bind(user_id)
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
