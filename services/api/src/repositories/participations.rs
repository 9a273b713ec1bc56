//! Participation request repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Event, EventRef, NewParticipation, Participation, Status, User, UserRef};

/// Persistence port for participation requests
#[async_trait]
pub trait ParticipationsRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Participation>>;

    /// Requests for the event in the given status, ordered by ascending id
    async fn find_by_event_and_status(
        &self,
        event_id: i32,
        status: Status,
    ) -> DatabaseResult<Vec<Participation>>;

    /// All requests filed by the user, ordered by ascending id
    async fn find_by_user(&self, user_id: i32) -> DatabaseResult<Vec<Participation>>;

    async fn insert(
        &self,
        user: &User,
        event: &Event,
        status: Status,
        request: &NewParticipation,
    ) -> DatabaseResult<Participation>;

    /// Returns false when no such request exists
    async fn update_status(&self, id: i32, status: Status) -> DatabaseResult<bool>;

    /// Returns false when no such request exists
    async fn delete_by_id(&self, id: i32) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed participation request repository
#[derive(Clone)]
pub struct PgParticipationsRepository {
    pool: PgPool,
}

impl PgParticipationsRepository {
    /// Create a new participation request repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_participation(row: &PgRow) -> Participation {
        Participation {
            id: row.get("id"),
            user: UserRef {
                id: row.get("user_id"),
                email: row.get("user_email"),
            },
            event: EventRef {
                id: row.get("event_id"),
                name: row.get("event_name"),
            },
            status: row.get("status"),
            fio: row.get("fio"),
            age: row.get("age"),
            covid_passport_number: row.get("covid_passport_number"),
        }
    }
}

#[async_trait]
impl ParticipationsRepository for PgParticipationsRepository {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Participation>> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.status, p.fio, p.age, p.covid_passport_number,
                   u.id AS user_id, u.email AS user_email,
                   e.id AS event_id, e.name AS event_name
            FROM participation_requests p
            JOIN users u ON u.id = p.user_id
            JOIN events e ON e.id = p.event_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_participation))
    }

    async fn find_by_event_and_status(
        &self,
        event_id: i32,
        status: Status,
    ) -> DatabaseResult<Vec<Participation>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.status, p.fio, p.age, p.covid_passport_number,
                   u.id AS user_id, u.email AS user_email,
                   e.id AS event_id, e.name AS event_name
            FROM participation_requests p
            JOIN users u ON u.id = p.user_id
            JOIN events e ON e.id = p.event_id
            WHERE p.event_id = $1 AND p.status = $2
            ORDER BY p.id
            "#,
        )
        .bind(event_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_participation).collect())
    }

    async fn find_by_user(&self, user_id: i32) -> DatabaseResult<Vec<Participation>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.status, p.fio, p.age, p.covid_passport_number,
                   u.id AS user_id, u.email AS user_email,
                   e.id AS event_id, e.name AS event_name
            FROM participation_requests p
            JOIN users u ON u.id = p.user_id
            JOIN events e ON e.id = p.event_id
            WHERE p.user_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_participation).collect())
    }

    async fn insert(
        &self,
        user: &User,
        event: &Event,
        status: Status,
        request: &NewParticipation,
    ) -> DatabaseResult<Participation> {
        info!(
            "Creating participation request for user {} on event {}",
            user.email, event.id
        );

        let row = sqlx::query(
            r#"
            INSERT INTO participation_requests
                (user_id, event_id, status, fio, age, covid_passport_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user.id)
        .bind(event.id)
        .bind(status)
        .bind(&request.fio)
        .bind(request.age)
        .bind(&request.covid_passport_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_query("participation_requests", e))?;

        Ok(Participation {
            id: row.get("id"),
            user: UserRef::from(user),
            event: EventRef {
                id: event.id,
                name: event.name.clone(),
            },
            status,
            fio: request.fio.clone(),
            age: request.age,
            covid_passport_number: request.covid_passport_number.clone(),
        })
    }

    async fn update_status(&self, id: i32, status: Status) -> DatabaseResult<bool> {
        info!("Setting participation request {} status to {:?}", id, status);

        let result = sqlx::query("UPDATE participation_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting participation request {}", id);

        let result = sqlx::query("DELETE FROM participation_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
