//! Data models for database seeding configuration.

use chrono::NaiveDateTime;
use studio_core::EntityId;

/// Seed data for creating a teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherSeed {
    pub first_name: String,
    pub last_name: String,
}

/// Seed data for creating a user.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Seed data for creating a session with its participants.
#[derive(Debug, Clone)]
pub struct SessionSeed {
    pub name: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub teacher_id: EntityId,
    pub users: Vec<EntityId>,
}

/// How much fake data a full seed run inserts.
#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    /// Fake teachers created in addition to the studio's default teachers.
    pub teachers: usize,
    pub users: usize,
    pub sessions: usize,
    /// Upper bound of participants booked into each seeded session.
    pub max_participants: usize,
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn with_teachers(mut self, teachers: usize) -> Self {
        self.teachers = teachers;
        self
    }

    pub fn with_sessions(mut self, sessions: usize, max_participants: usize) -> Self {
        self.sessions = sessions;
        self.max_participants = max_participants;
        self
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 3,
            users: 20,
            sessions: 10,
            max_participants: 8,
        }
    }
}
