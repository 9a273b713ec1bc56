//! Custom error types for the event manager service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use common::error::DatabaseError;

/// Custom error type for the event manager service
#[derive(Error, Debug)]
pub enum ApiError {
    /// No user matched the lookup; payload describes the key, e.g. `email = a@b.c`
    #[error("There is no user with {0}")]
    UserNotFound(String),

    /// No contract with the given id
    #[error("There is no contract with id = {0}")]
    ContractNotFound(i32),

    /// No event with the given id
    #[error("There is no event with id = {0}")]
    EventNotFound(i32),

    /// No participation request with the given id
    #[error("There is no participation request with id = {0}")]
    ParticipationNotFound(i32),

    /// Caller is authenticated but not allowed to perform the operation
    #[error("{0}")]
    Forbidden(String),

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Login failed; deliberately does not say which part was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing or unusable bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// A seeded role row is missing from the store
    #[error("There is no {0} in the roles table")]
    RoleNotConfigured(String),

    /// The store rejected a write because of a schema constraint
    #[error("Bad request. Constraint violation in table {table}: {message}")]
    Constraint { table: String, message: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[source] DatabaseError),

    /// Unexpected failure outside the business kinds
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn user_not_found_by_email(email: &str) -> Self {
        ApiError::UserNotFound(format!("email = {email}"))
    }

    pub fn user_not_found_by_id(id: i32) -> Self {
        ApiError::UserNotFound(format!("id = {id}"))
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Constraint { table, message } => ApiError::Constraint { table, message },
            other => ApiError::Database(other),
        }
    }
}

/// Error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UserNotFound(_)
            | ApiError::ContractNotFound(_)
            | ApiError::EventNotFound(_)
            | ApiError::ParticipationNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::Validation(_) | ApiError::Constraint { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::InvalidCredentials | ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::RoleNotConfigured(_) => {
                error!("Role configuration error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Database(ref e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(ref e) => {
                error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            message,
            timestamp: Utc::now(),
        });

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
