//! Database seeding for development and manual testing.
//!
//! A full run inserts the studio's default teachers, fake teachers, fake
//! users and upcoming sessions booked by those users. Every seeded user logs
//! in with [`SEED_PASSWORD`].

pub mod models;
pub mod sessions;
pub mod teachers;
pub mod users;

use sqlx::PgPool;
use std::time::Instant;

pub use models::{SeedConfig, SessionSeed, TeacherSeed, UserSeed};
pub use teachers::DEFAULT_TEACHERS;
pub use users::SEED_EMAIL_DOMAIN;

pub const SEED_PASSWORD: &str = "test!1234";

/// Summary of a full seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub teachers: usize,
    pub users: usize,
    pub sessions: usize,
}

/// Seeds teachers, users and sessions according to `config`.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<SeedReport> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let password_hash = studio_core::hash_password(SEED_PASSWORD).map_err(|e| e.error)?;

    let teacher_ids = teachers::seed_teachers(db, config.teachers).await?;
    let user_ids = users::seed_users(db, config.users, &password_hash).await?;
    let session_ids = sessions::seed_sessions(
        db,
        config.sessions,
        &teacher_ids,
        &user_ids,
        config.max_participants,
    )
    .await?;

    let report = SeedReport {
        teachers: teacher_ids.len(),
        users: user_ids.len(),
        sessions: session_ids.len(),
    };

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Teachers: {}", report.teachers);
    println!("   Users:    {} (password: {})", report.users, SEED_PASSWORD);
    println!("   Sessions: {}", report.sessions);

    Ok(report)
}

/// Removes seeded data. Admins and the default teachers survive.
pub async fn clear_seed(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...\n");

    sessions::clear_sessions(db).await?;
    users::clear_users(db).await?;
    teachers::clear_teachers(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
