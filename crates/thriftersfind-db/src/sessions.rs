//! Session storage.
//!
//! A session is an opaque token (a v4 UUID) mapped to a user and an expiry.
//! [`SessionStore::resolve`] turns a token into the [`SessionUser`] the
//! permission engine consumes; expired or unknown tokens resolve to `None`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use thriftersfind_core::{AppError, PermissionSet};
use thriftersfind_models::{RoleInfo, SessionUser, UserCredentials};
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up the password hash for an email, case-insensitively.
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;

    /// Opens a session for `user_id` and returns its token.
    async fn create_session(&self, user_id: Uuid, ttl_seconds: i64) -> Result<String, AppError>;

    async fn resolve(&self, token: &str) -> Result<Option<SessionUser>, AppError>;

    /// Removes a session. Unknown tokens are ignored.
    async fn revoke(&self, token: &str) -> Result<(), AppError>;
}

fn expiry_from_now(ttl_seconds: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_seconds(ttl_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::internal(anyhow::anyhow!(
                "Session TTL of {} seconds is out of range",
                ttl_seconds
            ))
        })
}

#[derive(Clone, Debug)]
pub struct PgSessionStore {
    db: PgPool,
}

impl PgSessionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Deletes every expired session, returning how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    password: String,
}

#[derive(sqlx::FromRow)]
struct SessionUserRow {
    id: Uuid,
    name: String,
    email: String,
    /// SQL `NULL` and a stored JSON `null` both mean no permission record.
    permissions: Option<Json<Option<PermissionSet>>>,
    role_id: Option<Uuid>,
    role_name: Option<String>,
}

impl From<SessionUserRow> for SessionUser {
    fn from(row: SessionUserRow) -> Self {
        let role = match (row.role_id, row.role_name) {
            (Some(id), Some(name)) => Some(RoleInfo { id, name }),
            _ => None,
        };

        SessionUser {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            permissions: row.permissions.and_then(|Json(p)| p),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    #[instrument(skip(self))]
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT id, password FROM users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|r| UserCredentials {
            id: r.id,
            password_hash: r.password,
        }))
    }

    #[instrument(skip(self))]
    async fn create_session(&self, user_id: Uuid, ttl_seconds: i64) -> Result<String, AppError> {
        let token = Uuid::new_v4();
        let expires_at = expiry_from_now(ttl_seconds)?;

        sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.db)
            .await?;

        Ok(token.to_string())
    }

    #[instrument(skip(self, token))]
    async fn resolve(&self, token: &str) -> Result<Option<SessionUser>, AppError> {
        let Ok(session_id) = Uuid::parse_str(token) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, SessionUserRow>(
            r#"
            SELECT u.id, u.name, u.email, u.permissions,
                   r.id AS role_id, r.name AS role_name
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE s.id = $1 AND s.expires_at > now()
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SessionUser::from))
    }

    #[instrument(skip(self, token))]
    async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let Ok(session_id) = Uuid::parse_str(token) else {
            return Ok(());
        };

        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}

struct StoredUser {
    user: SessionUser,
    password_hash: String,
}

/// Session store kept in process memory.
///
/// Used by the integration tests and for running the service without a
/// database. Sessions do not survive a restart.
#[derive(Default)]
pub struct MemorySessionStore {
    users: RwLock<HashMap<Uuid, StoredUser>>,
    sessions: RwLock<HashMap<String, (Uuid, DateTime<Utc>)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user. `password_hash` must be a bcrypt hash.
    pub async fn insert_user(&self, user: SessionUser, password_hash: impl Into<String>) {
        let stored = StoredUser {
            user,
            password_hash: password_hash.into(),
        };
        self.users.write().await.insert(stored.user.id, stored);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        before - sessions.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.user.email.eq_ignore_ascii_case(email))
            .map(|u| UserCredentials {
                id: u.user.id,
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn create_session(&self, user_id: Uuid, ttl_seconds: i64) -> Result<String, AppError> {
        if !self.users.read().await.contains_key(&user_id) {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        let expires_at = expiry_from_now(ttl_seconds)?;
        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), (user_id, expires_at));
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<SessionUser>, AppError> {
        let Some((user_id, expires_at)) = self.sessions.read().await.get(token).copied() else {
            return Ok(None);
        };
        if expires_at <= Utc::now() {
            self.sessions.write().await.remove(token);
            return Ok(None);
        }

        Ok(self
            .users
            .read()
            .await
            .get(&user_id)
            .map(|u| u.user.clone()))
    }

    async fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftersfind_core::PermissionFlag;

    fn user(email: &str) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: email.to_string(),
            role: Some(RoleInfo {
                id: Uuid::new_v4(),
                name: "staff".to_string(),
            }),
            permissions: Some(PermissionSet::only(&[PermissionFlag::Orders])),
        }
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        let u = user("clerk@thriftersfind.test");
        store.insert_user(u.clone(), "hash").await;

        let creds = store
            .find_credentials("CLERK@thriftersfind.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.id, u.id);
        assert_eq!(creds.password_hash, "hash");

        let token = store.create_session(u.id, 60).await.unwrap();
        assert_eq!(store.resolve(&token).await.unwrap(), Some(u));

        store.revoke(&token).await.unwrap();
        assert_eq!(store.resolve(&token).await.unwrap(), None);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_expired_session_does_not_resolve() {
        let store = MemorySessionStore::new();
        let u = user("late@thriftersfind.test");
        store.insert_user(u.clone(), "hash").await;

        let token = store.create_session(u.id, 0).await.unwrap();
        assert_eq!(store.resolve(&token).await.unwrap(), None);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_sessions() {
        let store = MemorySessionStore::new();
        let u = user("shift@thriftersfind.test");
        store.insert_user(u.clone(), "hash").await;

        store.create_session(u.id, -60).await.unwrap();
        store.create_session(u.id, -1).await.unwrap();
        let live = store.create_session(u.id, 3600).await.unwrap();

        assert_eq!(store.purge_expired().await, 2);
        assert_eq!(store.session_count().await, 1);
        assert_eq!(store.resolve(&live).await.unwrap(), Some(u));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_is_an_error() {
        let store = MemorySessionStore::new();
        let u = user("forever@thriftersfind.test");
        store.insert_user(u.clone(), "hash").await;

        let err = store.create_session(u.id, i64::MAX).await.unwrap_err();
        assert!(err.status.is_server_error());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_values() {
        let store = MemorySessionStore::new();
        assert!(store.find_credentials("nobody@x.test").await.unwrap().is_none());
        assert!(store.resolve("not-a-token").await.unwrap().is_none());
        assert!(store.revoke("not-a-token").await.is_ok());
        assert!(store.create_session(Uuid::new_v4(), 60).await.is_err());
    }

    #[test]
    fn test_row_without_role_name_has_no_role() {
        let row = SessionUserRow {
            id: Uuid::nil(),
            name: "x".to_string(),
            email: "x@x.test".to_string(),
            permissions: None,
            role_id: Some(Uuid::nil()),
            role_name: None,
        };
        let user = SessionUser::from(row);
        assert!(user.role.is_none());
        assert!(user.permissions.is_none());
    }

    #[test]
    fn test_json_null_permissions_read_as_absent() {
        let stored: Json<Option<PermissionSet>> = serde_json::from_str("null").unwrap();
        let row = SessionUserRow {
            id: Uuid::nil(),
            name: "x".to_string(),
            email: "x@x.test".to_string(),
            permissions: Some(stored),
            role_id: None,
            role_name: None,
        };
        assert!(SessionUser::from(row).permissions.is_none());
    }

    async fn insert_role(pool: &PgPool, name: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO roles (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    /// Inserts a user; `permissions` is bound as raw JSONB text, or SQL NULL.
    async fn insert_user(
        pool: &PgPool,
        email: &str,
        role_id: Option<Uuid>,
        permissions: Option<&str>,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password, role_id, permissions)
            VALUES ('Test User', $1, 'hash', $2, $3::jsonb)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(role_id)
        .bind(permissions)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_pg_resolve_joins_role_and_permissions(pool: PgPool) {
        let store = PgSessionStore::new(pool.clone());
        let role_id = insert_role(&pool, "Staff").await;
        let user_id = insert_user(
            &pool,
            "clerk@thriftersfind.test",
            Some(role_id),
            Some(r#"{"orders": true, "sales": null}"#),
        )
        .await;

        let creds = store
            .find_credentials("CLERK@ThriftersFind.test")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.id, user_id);

        let token = store.create_session(user_id, 3600).await.unwrap();
        let user = store.resolve(&token).await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.role_name(), Some("Staff"));
        assert_eq!(
            user.permissions,
            Some(PermissionSet::only(&[PermissionFlag::Orders]))
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_pg_resolve_user_without_role(pool: PgPool) {
        let store = PgSessionStore::new(pool.clone());
        let user_id = insert_user(&pool, "norole@thriftersfind.test", None, None).await;

        let token = store.create_session(user_id, 3600).await.unwrap();
        let user = store.resolve(&token).await.unwrap().unwrap();

        assert!(user.role.is_none());
        assert!(user.permissions.is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_pg_resolve_json_null_permissions(pool: PgPool) {
        let store = PgSessionStore::new(pool.clone());
        let role_id = insert_role(&pool, "admin").await;
        let user_id =
            insert_user(&pool, "nullperms@thriftersfind.test", Some(role_id), Some("null")).await;

        let token = store.create_session(user_id, 3600).await.unwrap();
        let user = store.resolve(&token).await.unwrap().unwrap();

        assert_eq!(user.role_name(), Some("admin"));
        assert!(user.permissions.is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_pg_expired_session_does_not_resolve(pool: PgPool) {
        let store = PgSessionStore::new(pool.clone());
        let user_id = insert_user(&pool, "late@thriftersfind.test", None, None).await;

        let expired = store.create_session(user_id, -60).await.unwrap();
        let live = store.create_session(user_id, 3600).await.unwrap();

        assert!(store.resolve(&expired).await.unwrap().is_none());
        assert!(store.resolve(&live).await.unwrap().is_some());

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.resolve(&live).await.unwrap().is_some());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_pg_revoke_and_unknown_tokens(pool: PgPool) {
        let store = PgSessionStore::new(pool.clone());
        let user_id = insert_user(&pool, "bye@thriftersfind.test", None, None).await;

        let token = store.create_session(user_id, 3600).await.unwrap();
        store.revoke(&token).await.unwrap();

        assert!(store.resolve(&token).await.unwrap().is_none());
        assert!(store.resolve("not-a-token").await.unwrap().is_none());
        assert!(store.revoke("not-a-token").await.is_ok());
        assert!(
            store
                .find_credentials("nobody@thriftersfind.test")
                .await
                .unwrap()
                .is_none()
        );
    }
}
