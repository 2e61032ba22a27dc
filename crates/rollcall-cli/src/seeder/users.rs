//! User seeding functionality.

use fake::Fake;
use fake::faker::name::en::Name;
use rayon::prelude::*;
use rollcall_auth::UserRole;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, SEED_ID_PREFIX, UserSeed};

/// Generates `count` users of one role in parallel.
pub fn generate_users(role: UserRole, count: usize, password_hash: &str) -> Vec<UserSeed> {
    let tag = match role {
        UserRole::Admin => "A",
        UserRole::Teacher => "T",
        UserRole::Student => "S",
    };

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let name: String = Name().fake();
            let id = format!("{}{}-{:04}", SEED_ID_PREFIX, tag, idx + 1);
            let email = format!("{}@{}", id.to_lowercase(), SEED_EMAIL_DOMAIN);

            let (roll_number, enrollment_number) = match role {
                UserRole::Student => (
                    Some(format!("{:03}", idx + 1)),
                    Some(format!("EN{:06}", 100_000 + idx)),
                ),
                _ => (None, None),
            };

            UserSeed {
                id,
                name,
                email,
                password_hash: password_hash.to_string(),
                role,
                roll_number,
                enrollment_number,
            }
        })
        .collect()
}

/// Seeds users of one role and returns their ids.
pub async fn seed_users(
    db: &PgPool,
    role: UserRole,
    count: usize,
    password_hash: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} {}s...", count, role);

    let users = generate_users(role, count, password_hash);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} {}s in {:?}",
        ids.len(),
        role,
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts users in batches inside one transaction. Existing ids are
/// skipped.
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 7 params per user
    const BATCH_SIZE: usize = 1000;

    let mut ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO users (id, name, email, password_hash, role, roll_number, enrollment_number) VALUES ",
    );

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 7;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7
        ));
    }

    query.push_str(" ON CONFLICT DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(&user.roll_number)
            .bind(&user.enrollment_number);
    }

    let ids: Vec<String> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}
