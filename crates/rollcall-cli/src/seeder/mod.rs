//! Fake data for local development.
//!
//! Seeded users carry the `SEED-` id prefix and share one password, so a
//! seeded database can be logged into right away and wiped again without
//! touching real accounts.

mod lectures;
mod models;
mod users;

pub use lectures::{generate_attendance, generate_lectures, seed_attendance, seed_lectures};
pub use models::{SEED_EMAIL_DOMAIN, SEED_ID_PREFIX, SEED_PASSWORD, SeedConfig};
pub use users::{generate_users, seed_users};

use rollcall_auth::UserRole;
use sqlx::PgPool;
use std::time::Instant;

/// Seed hashes use a low bcrypt cost. Real accounts go through
/// `hash_password`.
const SEED_BCRYPT_COST: u32 = 4;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Teachers: {}", config.teachers);
    println!("   - Students: {}", config.students);
    println!("   - Lectures per teacher: {}", config.lectures_per_teacher);

    let password_hash = bcrypt::hash(SEED_PASSWORD, SEED_BCRYPT_COST)
        .map_err(|e| format!("Failed to hash password: {}", e))?;

    let teacher_ids = seed_users(db, UserRole::Teacher, config.teachers, &password_hash).await?;
    let student_ids = seed_users(db, UserRole::Student, config.students, &password_hash).await?;

    let lectures = seed_lectures(db, &teacher_ids, config.lectures_per_teacher).await?;
    let attendance =
        seed_attendance(db, &lectures, &student_ids, config.attendance_rate).await?;

    println!(
        "\n✅ Seeding complete! {} teachers, {} students, {} lectures, {} attendance records in {:?}",
        teacher_ids.len(),
        student_ids.len(),
        lectures.len(),
        attendance,
        start_time.elapsed()
    );
    println!("\n📝 Default password for all users: {}", SEED_PASSWORD);

    Ok(())
}

/// Removes every seeded row, archive copies included. Admin accounts and
/// users without the seed prefix are left alone.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let pattern = format!("{}%", SEED_ID_PREFIX);
    let mut tx = db.begin().await?;

    let attendance_deleted = sqlx::query(
        r#"
        DELETE FROM attendance
        WHERE student_id LIKE $1
           OR lecture_id IN (SELECT id FROM lectures WHERE teacher_id LIKE $1)
        "#,
    )
    .bind(&pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let lectures_deleted = sqlx::query("DELETE FROM lectures WHERE teacher_id LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM archived_attendance WHERE student_id LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM archived_lectures WHERE teacher_id LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;

    let users_deleted = sqlx::query("DELETE FROM users WHERE id LIKE $1 AND role <> 'admin'")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "✅ Cleared {} users, {} lectures and {} attendance records in {:?}",
        users_deleted,
        lectures_deleted,
        attendance_deleted,
        start_time.elapsed()
    );

    Ok(())
}
