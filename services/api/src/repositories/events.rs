//! Event repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Event, NewEvent, User, UserRef};

/// Persistence port for events
#[async_trait]
pub trait EventsRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Event>>;

    /// Events owned by the user, ordered by ascending id
    async fn find_by_owner(&self, user_id: i32) -> DatabaseResult<Vec<Event>>;

    async fn insert(&self, owner: &User, event: &NewEvent) -> DatabaseResult<Event>;

    /// Delete the event and its participation requests in one transaction.
    /// Returns false when no such event exists.
    async fn delete_cascading(&self, id: i32) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed event repository
#[derive(Clone)]
pub struct PgEventsRepository {
    pool: PgPool,
}

impl PgEventsRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_event(row: &PgRow) -> Event {
        Event {
            id: row.get("id"),
            user: UserRef {
                id: row.get("user_id"),
                email: row.get("user_email"),
            },
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
        }
    }
}

#[async_trait]
impl EventsRepository for PgEventsRepository {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Event>> {
        let row = sqlx::query(
            r#"
            SELECT e.id, e.name, e.description, e.price,
                   u.id AS user_id, u.email AS user_email
            FROM events e
            JOIN users u ON u.id = e.user_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_event))
    }

    async fn find_by_owner(&self, user_id: i32) -> DatabaseResult<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.name, e.description, e.price,
                   u.id AS user_id, u.email AS user_email
            FROM events e
            JOIN users u ON u.id = e.user_id
            WHERE e.user_id = $1
            ORDER BY e.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_event).collect())
    }

    async fn insert(&self, owner: &User, event: &NewEvent) -> DatabaseResult<Event> {
        info!("Creating event '{}' for manager {}", event.name, owner.email);

        let row = sqlx::query(
            r#"
            INSERT INTO events (user_id, name, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(owner.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_query("events", e))?;

        Ok(Event {
            id: row.get("id"),
            user: UserRef::from(owner),
            name: event.name.clone(),
            description: event.description.clone(),
            price: event.price,
        })
    }

    async fn delete_cascading(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting event {} and its participation requests", id);

        let mut tx = self.pool.begin().await.map_err(DatabaseError::Connection)?;

        sqlx::query("DELETE FROM participation_requests WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::Query)?;

        tx.commit().await.map_err(DatabaseError::Connection)?;

        Ok(result.rows_affected() > 0)
    }
}
