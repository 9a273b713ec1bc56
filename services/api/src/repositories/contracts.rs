//! Contract repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Contract, Status, User, UserRef};

/// Persistence port for contracts
#[async_trait]
pub trait ContractsRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Contract>>;

    /// Contracts in the given status, ordered by ascending id
    async fn find_by_status(&self, status: Status) -> DatabaseResult<Vec<Contract>>;

    /// The user's contracts in the given status, ordered by ascending id
    async fn find_by_user_and_status(
        &self,
        user_id: i32,
        status: Status,
    ) -> DatabaseResult<Vec<Contract>>;

    async fn insert(&self, user: &User, status: Status) -> DatabaseResult<Contract>;

    /// Returns false when no such contract exists
    async fn update_status(&self, id: i32, status: Status) -> DatabaseResult<bool>;

    /// Returns false when no such contract exists
    async fn delete_by_id(&self, id: i32) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed contract repository
#[derive(Clone)]
pub struct PgContractsRepository {
    pool: PgPool,
}

impl PgContractsRepository {
    /// Create a new contract repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_contract(row: &PgRow) -> Contract {
        Contract {
            id: row.get("id"),
            user: UserRef {
                id: row.get("user_id"),
                email: row.get("user_email"),
            },
            status: row.get("status"),
        }
    }
}

#[async_trait]
impl ContractsRepository for PgContractsRepository {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Contract>> {
        let row = sqlx::query(
            r#"
            SELECT c.id, c.status, u.id AS user_id, u.email AS user_email
            FROM contracts c
            JOIN users u ON u.id = c.user_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_contract))
    }

    async fn find_by_status(&self, status: Status) -> DatabaseResult<Vec<Contract>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.status, u.id AS user_id, u.email AS user_email
            FROM contracts c
            JOIN users u ON u.id = c.user_id
            WHERE c.status = $1
            ORDER BY c.id
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_contract).collect())
    }

    async fn find_by_user_and_status(
        &self,
        user_id: i32,
        status: Status,
    ) -> DatabaseResult<Vec<Contract>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.status, u.id AS user_id, u.email AS user_email
            FROM contracts c
            JOIN users u ON u.id = c.user_id
            WHERE c.user_id = $1 AND c.status = $2
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_contract).collect())
    }

    async fn insert(&self, user: &User, status: Status) -> DatabaseResult<Contract> {
        info!("Creating contract for user {}", user.email);

        let row = sqlx::query(
            r#"
            INSERT INTO contracts (user_id, status)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(user.id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_query("contracts", e))?;

        Ok(Contract {
            id: row.get("id"),
            user: UserRef::from(user),
            status,
        })
    }

    async fn update_status(&self, id: i32, status: Status) -> DatabaseResult<bool> {
        info!("Setting contract {} status to {:?}", id, status);

        let result = sqlx::query("UPDATE contracts SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting contract {}", id);

        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
