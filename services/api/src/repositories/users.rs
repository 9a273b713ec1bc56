//! User repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Role, User};

/// Persistence port for user accounts
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>>;

    /// Users holding the given role name, ordered by ascending id
    async fn find_by_role(&self, role: &str) -> DatabaseResult<Vec<User>>;

    async fn insert(&self, email: &str, password_hash: &str, role: &Role) -> DatabaseResult<User>;

    /// Delete the user together with everything hanging off it: their own
    /// participation requests, requests attached to their events, their
    /// contracts, their events, then the user row itself. All steps run in
    /// one transaction. Returns false when no such user exists.
    async fn delete_cascading(&self, id: i32) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_user(row: &PgRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: row.get("role"),
        }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email, u.password_hash, r.name AS role
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_user))
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email, u.password_hash, r.name AS role
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_user))
    }

    async fn find_by_role(&self, role: &str) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.email, u.password_hash, r.name AS role
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE r.name = $1
            ORDER BY u.id
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_user).collect())
    }

    async fn insert(&self, email: &str, password_hash: &str, role: &Role) -> DatabaseResult<User> {
        info!("Creating new user: {}", email);

        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, role_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_query("users", e))?;

        Ok(User {
            id: row.get("id"),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: role.name.clone(),
        })
    }

    async fn delete_cascading(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting user {} and all owned records", id);

        let mut tx = self.pool.begin().await.map_err(DatabaseError::Connection)?;

        sqlx::query("DELETE FROM participation_requests WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        sqlx::query(
            r#"
            DELETE FROM participation_requests
            WHERE event_id IN (SELECT id FROM events WHERE user_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::Query)?;

        sqlx::query("DELETE FROM contracts WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        sqlx::query("DELETE FROM events WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        tx.commit().await.map_err(DatabaseError::Connection)?;

        Ok(result.rows_affected() > 0)
    }
}
