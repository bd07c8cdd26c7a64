//! User seeding functionality.
//!
//! Seeded users share one password and an `@example.com` address, which is
//! how [`clear_users`] recognizes them.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;
use studio_core::EntityId;

use super::models::UserSeed;
use super::teachers::clamp;

pub const SEED_EMAIL_DOMAIN: &str = "example.com";

const EMAIL_MAX: usize = 50;

/// Generates fake users in parallel using Rayon
pub fn generate_users(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(idx, password_hash))
        .collect()
}

fn generate_user(idx: usize, password_hash: &str) -> UserSeed {
    let first_name = clamp(FirstName().fake());
    let last_name = clamp(LastName().fake());

    let local: String = format!("{}.{}", first_name, last_name)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect();
    let mut email = format!("{}+{}@{}", local, idx, SEED_EMAIL_DOMAIN);
    if email.len() > EMAIL_MAX {
        email = format!("user{}@{}", idx, SEED_EMAIL_DOMAIN);
    }

    UserSeed {
        email,
        first_name,
        last_name,
        password_hash: password_hash.to_string(),
    }
}

/// Seeds `count` users, returning the ids of the inserted rows.
pub async fn seed_users(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> anyhow::Result<Vec<EntityId>> {
    let start_time = Instant::now();
    println!("👤 Seeding {} users...", count);

    let users = generate_users(count, password_hash);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts users with UNNEST, skipping addresses that are already taken
pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<Vec<EntityId>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut emails = Vec::with_capacity(users.len());
    let mut first_names = Vec::with_capacity(users.len());
    let mut last_names = Vec::with_capacity(users.len());
    let mut hashes = Vec::with_capacity(users.len());
    for user in users {
        emails.push(user.email.clone());
        first_names.push(user.first_name.clone());
        last_names.push(user.last_name.clone());
        hashes.push(user.password_hash.clone());
    }

    let mut tx = db.begin().await?;
    let ids = sqlx::query_scalar(
        r#"INSERT INTO users (email, first_name, last_name, password)
        SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[])
        ON CONFLICT (email) DO NOTHING
        RETURNING id"#,
    )
    .bind(&emails)
    .bind(&first_names)
    .bind(&last_names)
    .bind(&hashes)
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(ids)
}

/// Clears seeded users, keeping admins
pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1 AND admin = FALSE")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
