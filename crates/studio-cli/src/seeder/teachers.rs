//! Teacher seeding functionality.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;
use studio_core::EntityId;

use super::models::TeacherSeed;

/// Teachers every studio starts with.
pub const DEFAULT_TEACHERS: [(&str, &str); 2] =
    [("Margot", "Delahaye"), ("Hélène", "Thiercelin")];

const NAME_MAX: usize = 20;

pub(crate) fn clamp(value: String) -> String {
    value.chars().take(NAME_MAX).collect()
}

/// Generates fake teachers in parallel using Rayon
pub fn generate_teachers(count: usize) -> Vec<TeacherSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| TeacherSeed {
            first_name: clamp(FirstName().fake()),
            last_name: clamp(LastName().fake()),
        })
        .collect()
}

/// Inserts the default teachers unless a teacher with the same name exists.
pub async fn ensure_default_teachers(db: &PgPool) -> anyhow::Result<Vec<EntityId>> {
    let mut ids = Vec::with_capacity(DEFAULT_TEACHERS.len());

    for (first_name, last_name) in DEFAULT_TEACHERS {
        let existing: Option<EntityId> = sqlx::query_scalar(
            "SELECT id FROM teachers WHERE first_name = $1 AND last_name = $2 LIMIT 1",
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(db)
        .await?;

        let id = match existing {
            Some(id) => id,
            None => {
                sqlx::query_scalar(
                    "INSERT INTO teachers (first_name, last_name) VALUES ($1, $2) RETURNING id",
                )
                .bind(first_name)
                .bind(last_name)
                .fetch_one(db)
                .await?
            }
        };
        ids.push(id);
    }

    Ok(ids)
}

/// Seeds the default teachers plus `count` fake ones, returning every id.
pub async fn seed_teachers(db: &PgPool, count: usize) -> anyhow::Result<Vec<EntityId>> {
    let start_time = Instant::now();
    println!("🧘 Seeding {} teachers...", count + DEFAULT_TEACHERS.len());

    let mut ids = ensure_default_teachers(db).await?;
    let teachers = generate_teachers(count);
    ids.extend(insert_teachers_batch(db, &teachers).await?);

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts teachers with a single UNNEST statement
pub async fn insert_teachers_batch(
    db: &PgPool,
    teachers: &[TeacherSeed],
) -> anyhow::Result<Vec<EntityId>> {
    if teachers.is_empty() {
        return Ok(Vec::new());
    }

    let (first_names, last_names): (Vec<String>, Vec<String>) = teachers
        .iter()
        .map(|t| (t.first_name.clone(), t.last_name.clone()))
        .unzip();

    let ids = sqlx::query_scalar(
        r#"INSERT INTO teachers (first_name, last_name)
        SELECT * FROM UNNEST($1::text[], $2::text[])
        RETURNING id"#,
    )
    .bind(&first_names)
    .bind(&last_names)
    .fetch_all(db)
    .await?;

    Ok(ids)
}

/// Clears every teacher except the studio defaults
pub async fn clear_teachers(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded teachers...");

    let (first_names, last_names): (Vec<String>, Vec<String>) = DEFAULT_TEACHERS
        .iter()
        .map(|(first, last)| (first.to_string(), last.to_string()))
        .unzip();

    let result = sqlx::query(
        r#"DELETE FROM teachers t
        WHERE NOT EXISTS (
            SELECT 1 FROM UNNEST($1::text[], $2::text[]) AS d(first_name, last_name)
            WHERE d.first_name = t.first_name AND d.last_name = t.last_name
        )"#,
    )
    .bind(&first_names)
    .bind(&last_names)
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} teachers in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
