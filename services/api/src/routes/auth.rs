//! Registration and login endpoints

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{LoginCredentials, RegisterUser};
use crate::state::AppState;
use crate::validation;

/// Response carrying a freshly issued access token
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registration/manager", post(register_manager))
        .route("/registration/participant", post(register_participant))
        .route("/login", post(login))
}

/// Register a manager account and issue a token for it
pub async fn register_manager(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUser>,
) -> Result<impl IntoResponse, ApiError> {
    validate_registration(&payload)?;

    let user = state.user_service.register_manager(&payload).await?;
    let token = state.jwt_service.generate_token(&user.email)?;

    Ok(Json(TokenResponse { token }))
}

/// Register a participant account and issue a token for it
pub async fn register_participant(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUser>,
) -> Result<impl IntoResponse, ApiError> {
    validate_registration(&payload)?;

    let user = state.user_service.register_participant(&payload).await?;
    let token = state.jwt_service.generate_token(&user.email)?;

    Ok(Json(TokenResponse { token }))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let user = state
        .user_service
        .verify_credentials(&payload.email, &payload.password)
        .await?;
    let token = state.jwt_service.generate_token(&user.email)?;

    Ok(Json(TokenResponse { token }))
}

fn validate_registration(payload: &RegisterUser) -> Result<(), ApiError> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;
    Ok(())
}
