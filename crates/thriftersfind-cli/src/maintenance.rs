//! Role seeding, super admin creation, and permission repair.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use thriftersfind_core::permissions::role_names;
use thriftersfind_core::{PermissionSet, hash_password};
use thriftersfind_models::DEFAULT_ROLES;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct NewSuperAdmin {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Inserts the default roles that are missing. Returns how many were added.
pub async fn seed_roles(pool: &PgPool) -> anyhow::Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for &name in DEFAULT_ROLES {
        if find_role(&mut tx, name).await?.is_none() {
            sqlx::query("INSERT INTO roles (name) VALUES ($1)")
                .bind(name)
                .execute(&mut *tx)
                .await?;
            inserted += 1;
        }
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn find_role(tx: &mut Transaction<'_, Postgres>, name: &str) -> anyhow::Result<Option<Uuid>> {
    let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM roles WHERE lower(name) = lower($1)")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(id)
}

/// Creates a user with the super admin role and every permission flag set.
pub async fn create_super_admin(pool: &PgPool, admin: &NewSuperAdmin) -> anyhow::Result<Uuid> {
    admin.validate()?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE lower(email) = lower($1)")
        .bind(&admin.email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        anyhow::bail!("A user with email {} already exists", admin.email);
    }

    let role_id = match find_role(&mut tx, role_names::SUPER_ADMIN).await? {
        Some(id) => id,
        None => {
            sqlx::query_scalar::<_, Uuid>("INSERT INTO roles (name) VALUES ($1) RETURNING id")
                .bind(role_names::SUPER_ADMIN)
                .fetch_one(&mut *tx)
                .await?
        }
    };

    let password_hash = hash_password(&admin.password).map_err(|e| e.error)?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (name, email, password, role_id, permissions)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&password_hash)
    .bind(role_id)
    .bind(Json(PermissionSet::all()))
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(user_id)
}

/// Sets every permission flag for all super admins. Returns the rows updated.
pub async fn repair_permissions(pool: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET permissions = $1, updated_at = now()
        WHERE role_id IN (SELECT id FROM roles WHERE lower(name) = lower($2))
        "#,
    )
    .bind(Json(PermissionSet::all()))
    .bind(role_names::SUPER_ADMIN)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
