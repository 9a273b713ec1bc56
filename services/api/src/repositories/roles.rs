//! Role repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row};

use crate::models::Role;

/// Persistence port for the seeded role rows
#[async_trait]
pub trait RolesRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Role>>;
}

/// PostgreSQL-backed role repository
#[derive(Clone)]
pub struct PgRolesRepository {
    pool: PgPool,
}

impl PgRolesRepository {
    /// Create a new role repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RolesRepository for PgRolesRepository {
    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.map(|row| Role {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }
}
