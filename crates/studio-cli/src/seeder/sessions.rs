//! Session seeding functionality.

use chrono::{Duration, NaiveTime, Utc};
use fake::Fake;
use fake::faker::lorem::en::Paragraph;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;
use studio_core::EntityId;

use super::models::SessionSeed;

const STYLES: [&str; 8] = [
    "Vinyasa",
    "Hatha",
    "Yin",
    "Ashtanga",
    "Kundalini",
    "Restorative",
    "Power",
    "Prenatal",
];

const SLOTS: [(&str, u32); 4] = [("Sunrise", 7), ("Midday", 12), ("Evening", 18), ("Late", 20)];

/// Generates sessions over the next four weeks with a random teacher and
/// a random subset of `user_ids` as participants.
pub fn generate_sessions(
    count: usize,
    teacher_ids: &[EntityId],
    user_ids: &[EntityId],
    max_participants: usize,
) -> Vec<SessionSeed> {
    if teacher_ids.is_empty() {
        return Vec::new();
    }
    let today = Utc::now().date_naive();

    (0..count)
        .into_par_iter()
        .map(|_| {
            let style = STYLES[(0..STYLES.len()).fake::<usize>()];
            let (slot, hour) = SLOTS[(0..SLOTS.len()).fake::<usize>()];
            let day = today + Duration::days((1..29).fake::<i64>());
            let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default();

            let mut users: Vec<EntityId> = Vec::new();
            if !user_ids.is_empty() && max_participants > 0 {
                let wanted = (0..=max_participants.min(user_ids.len())).fake::<usize>();
                while users.len() < wanted {
                    let id = user_ids[(0..user_ids.len()).fake::<usize>()];
                    if !users.contains(&id) {
                        users.push(id);
                    }
                }
                users.sort_unstable();
            }

            SessionSeed {
                name: format!("{} {} Flow", slot, style),
                date: day.and_time(time),
                description: Paragraph(1..4).fake(),
                teacher_id: teacher_ids[(0..teacher_ids.len()).fake::<usize>()],
                users,
            }
        })
        .collect()
}

/// Seeds sessions and their participations, returning the session ids.
pub async fn seed_sessions(
    db: &PgPool,
    count: usize,
    teacher_ids: &[EntityId],
    user_ids: &[EntityId],
    max_participants: usize,
) -> anyhow::Result<Vec<EntityId>> {
    let start_time = Instant::now();
    println!("📅 Seeding {} sessions...", count);

    let sessions = generate_sessions(count, teacher_ids, user_ids, max_participants);
    let ids = insert_sessions(db, &sessions).await?;

    println!(
        "   ✓ Inserted {} sessions in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

async fn insert_sessions(db: &PgPool, sessions: &[SessionSeed]) -> anyhow::Result<Vec<EntityId>> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(sessions.len());
    let mut participations = 0usize;

    for session in sessions {
        let id: EntityId = sqlx::query_scalar(
            r#"INSERT INTO sessions (name, date, description, teacher_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id"#,
        )
        .bind(&session.name)
        .bind(session.date)
        .bind(&session.description)
        .bind(session.teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        if !session.users.is_empty() {
            participations += sqlx::query(
                r#"INSERT INTO participate (user_id, session_id)
                SELECT u, $2 FROM UNNEST($1::bigint[]) AS u
                ON CONFLICT DO NOTHING"#,
            )
            .bind(&session.users)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected() as usize;
        }

        ids.push(id);
    }

    tx.commit().await?;
    println!("   ✓ Booked {} participations", participations);
    Ok(ids)
}

/// Clears all sessions (participations cascade)
pub async fn clear_sessions(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing sessions...");

    let result = sqlx::query("DELETE FROM sessions")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} sessions in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
