//! Custom error types for the common library
//!
//! This module defines the database-level error types shared by every
//! repository in the workspace.

use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A statement was rejected by a schema constraint
    #[error("Constraint violation in table {table}: {message}")]
    Constraint { table: String, message: String },
}

impl DatabaseError {
    /// Classify a query failure, surfacing constraint rejections separately
    /// so callers can report them as client errors.
    pub fn from_query(table: &str, err: SqlxError) -> Self {
        if let Some(db) = err.as_database_error() {
            if matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return DatabaseError::Constraint {
                    table: table.to_string(),
                    message: db.message().to_string(),
                };
            }
        }
        DatabaseError::Query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
