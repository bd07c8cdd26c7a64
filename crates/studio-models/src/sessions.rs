//! Yoga session models and DTOs.
//!
//! [`SessionDto`] is both the request and the response body of the session
//! endpoints. On input, `id`, `createdAt` and `updatedAt` are ignored and
//! `users`, when present, replaces the participant list.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::EntityId;
use studio_core::serde::deserialize_flexible_datetime;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::validate_not_blank;

/// A session with its participant ids, ascending.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Session {
    pub id: EntityId,
    pub name: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub teacher_id: Option<EntityId>,
    pub users: Vec<EntityId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Session {
    pub fn has_participant(&self, user_id: EntityId) -> bool {
        self.users.contains(&user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 50, message = "name must be at most 50 characters")
    )]
    #[schema(example = "Morning flow")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-20T08:00:00")]
    pub date: NaiveDateTime,
    #[serde(rename = "teacher_id")]
    pub teacher_id: EntityId,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 2500, message = "description must be at most 2500 characters")
    )]
    pub description: String,
    #[serde(default)]
    pub users: Option<Vec<EntityId>>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            id: Some(session.id),
            name: session.name,
            date: session.date,
            // Sessions whose teacher was deleted fall back to 0, never a valid id.
            teacher_id: session.teacher_id.unwrap_or_default(),
            description: session.description,
            users: Some(session.users),
            created_at: Some(session.created_at),
            updated_at: Some(session.updated_at),
        }
    }
}

/// Validated values written by session create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInput {
    pub name: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub teacher_id: EntityId,
    /// `None` keeps the current participants on update.
    pub users: Option<Vec<EntityId>>,
}

impl From<SessionDto> for SessionInput {
    fn from(dto: SessionDto) -> Self {
        Self {
            name: dto.name,
            date: dto.date,
            description: dto.description,
            teacher_id: dto.teacher_id,
            users: dto.users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_body() -> serde_json::Value {
        json!({
            "name": "Morning flow",
            "date": "2025-01-20T08:00:00",
            "teacher_id": 1,
            "description": "Gentle vinyasa"
        })
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let dto: SessionDto = serde_json::from_value(request_body()).unwrap();
        assert_eq!(dto.name, "Morning flow");
        assert_eq!(dto.teacher_id, 1);
        assert!(dto.users.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_deserialize_accepts_epoch_millis_date() {
        let mut body = request_body();
        body["date"] = json!(1_737_360_000_000_i64);
        let dto: SessionDto = serde_json::from_value(body).unwrap();
        assert_eq!(dto.date.to_string(), "2025-01-20 08:00:00");
    }

    #[test]
    fn test_missing_teacher_is_rejected() {
        let mut body = request_body();
        body.as_object_mut().unwrap().remove("teacher_id");
        assert!(serde_json::from_value::<SessionDto>(body).is_err());
    }

    #[test]
    fn test_validation_limits() {
        let mut body = request_body();
        body["name"] = json!("x".repeat(51));
        let dto: SessionDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().is_err());

        let mut body = request_body();
        body["description"] = json!("   ");
        let dto: SessionDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().is_err());

        let mut body = request_body();
        body["description"] = json!("x".repeat(2500));
        let dto: SessionDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_response_shape() {
        let now = chrono::Utc::now().naive_utc();
        let session = Session {
            id: 7,
            name: "Evening yin".to_string(),
            date: now,
            description: "Slow".to_string(),
            teacher_id: Some(2),
            users: vec![3, 5],
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(SessionDto::from(session)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["teacher_id"], 2);
        assert_eq!(json["users"], json!([3, 5]));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
