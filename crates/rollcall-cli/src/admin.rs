//! Admin account creation.
//!
//! The API refuses to register admins, so this is the only way to create
//! one.

use rollcall_auth::UserRole;
use rollcall_core::hash_password;
use sqlx::PgPool;

pub struct NewAdmin<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

pub async fn create_admin(
    db: &PgPool,
    admin: NewAdmin<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    if admin.id.trim().is_empty() || admin.name.trim().is_empty() {
        return Err("ID and name must not be empty".into());
    }
    if !admin.email.contains('@') {
        return Err(format!("'{}' is not a valid email address", admin.email).into());
    }
    if admin.password.is_empty() {
        return Err("Password must not be empty".into());
    }

    let password_hash = hash_password(admin.password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let inserted = sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT DO NOTHING
        RETURNING id
        "#,
    )
    .bind(admin.id.trim())
    .bind(admin.name.trim())
    .bind(admin.email.trim().to_lowercase())
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .fetch_optional(&mut *tx)
    .await?;

    if inserted.is_none() {
        return Err(format!(
            "A user with ID '{}' or email '{}' already exists",
            admin.id, admin.email
        )
        .into());
    }

    tx.commit().await?;
    Ok(())
}
