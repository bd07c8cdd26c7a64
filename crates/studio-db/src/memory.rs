//! In-memory repositories for tests.
//!
//! [`InMemoryStore`] implements every repository trait over a single locked
//! state, so foreign-key behaviour (participations removed with their user or
//! session, unknown participant ids dropped) matches the SQL schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use studio_core::{AppError, EntityId};
use studio_models::{NewTeacher, NewUser, Session, SessionInput, Teacher, User};
use tokio::sync::RwLock;

use crate::repositories::{SessionRepository, TeacherRepository, UserRepository};

#[derive(Default)]
struct State {
    users: BTreeMap<EntityId, User>,
    teachers: BTreeMap<EntityId, Teacher>,
    sessions: BTreeMap<EntityId, Session>,
    last_user_id: EntityId,
    last_teacher_id: EntityId,
    last_session_id: EntityId,
}

impl State {
    /// Keeps ids that match a user, ascending and without repeats.
    fn existing_users(&self, ids: &[EntityId]) -> Vec<EntityId> {
        let mut kept: Vec<EntityId> = ids
            .iter()
            .copied()
            .filter(|id| self.users.contains_key(id))
            .collect();
        kept.sort_unstable();
        kept.dedup();
        kept
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Error: Email is already taken!"
            )));
        }

        state.last_user_id += 1;
        let timestamp = now();
        let created = User {
            id: state.last_user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password: user.password_hash,
            admin: user.admin,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        for session in state.sessions.values_mut() {
            session.users.retain(|user_id| *user_id != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl TeacherRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Teacher>, AppError> {
        Ok(self.state.read().await.teachers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Teacher>, AppError> {
        Ok(self.state.read().await.teachers.get(&id).cloned())
    }

    async fn create(&self, teacher: NewTeacher) -> Result<Teacher, AppError> {
        let mut state = self.state.write().await;
        state.last_teacher_id += 1;
        let timestamp = now();
        let created = Teacher {
            id: state.last_teacher_id,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.teachers.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Session>, AppError> {
        Ok(self.state.read().await.sessions.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Session>, AppError> {
        Ok(self.state.read().await.sessions.get(&id).cloned())
    }

    async fn create(&self, input: SessionInput) -> Result<Session, AppError> {
        let mut state = self.state.write().await;
        let users = input
            .users
            .as_deref()
            .map(|ids| state.existing_users(ids))
            .unwrap_or_default();

        state.last_session_id += 1;
        let timestamp = now();
        let created = Session {
            id: state.last_session_id,
            name: input.name,
            date: input.date,
            description: input.description,
            teacher_id: Some(input.teacher_id),
            users,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.sessions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: EntityId,
        input: SessionInput,
    ) -> Result<Option<Session>, AppError> {
        let mut state = self.state.write().await;
        let users = input.users.as_deref().map(|ids| state.existing_users(ids));

        let Some(session) = state.sessions.get_mut(&id) else {
            return Ok(None);
        };
        session.name = input.name;
        session.date = input.date;
        session.description = input.description;
        session.teacher_id = Some(input.teacher_id);
        if let Some(users) = users {
            session.users = users;
        }
        session.updated_at = now();
        Ok(Some(session.clone()))
    }

    async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        Ok(self.state.write().await.sessions.remove(&id).is_some())
    }

    async fn add_participant(
        &self,
        session_id: EntityId,
        user_id: EntityId,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }
        let session = state
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Session not found")))?;
        if let Err(pos) = session.users.binary_search(&user_id) {
            session.users.insert(pos, user_id);
        }
        Ok(())
    }

    async fn remove_participant(
        &self,
        session_id: EntityId,
        user_id: EntityId,
    ) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let Some(session) = state.sessions.get_mut(&session_id) else {
            return Ok(false);
        };
        let before = session.users.len();
        session.users.retain(|id| *id != user_id);
        Ok(session.users.len() != before)
    }
}
