//! Teacher domain models and DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::EntityId;
use utoipa::ToSchema;

/// A teacher as stored in the `teachers` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Teacher {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Values needed to insert a teacher. Teachers are only created by the CLI.
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    pub id: EntityId,
    #[schema(example = "Margot")]
    pub first_name: String,
    #[schema(example = "Delahaye")]
    pub last_name: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: NaiveDateTime,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: NaiveDateTime,
}

impl From<Teacher> for TeacherDto {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}
