//! Contract workflow endpoints

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Contract, Privilege, Status};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contract))
        .route("/pending", get(list_pending))
        .route("/rejected", get(list_rejected))
        .route("/accepted", get(list_accepted))
        .route("/manager/valid", get(has_valid_contract))
        .route("/accept/:id", patch(accept_contract))
        .route("/reject/:id", patch(reject_contract))
        .route("/:id", delete(delete_contract))
}

pub async fn list_pending(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_status(state, auth, Status::Pending).await
}

pub async fn list_rejected(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_status(state, auth, Status::Rejected).await
}

pub async fn list_accepted(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_status(state, auth, Status::Accepted).await
}

async fn list_by_status(
    state: AppState,
    auth: AuthUser,
    status: Status,
) -> Result<Json<Vec<Contract>>, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    Ok(Json(state.contract_service.list_by_status(status).await?))
}

/// File a contract for the calling manager
pub async fn create_contract(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;

    let contract = state.contract_service.create(&auth.email).await?;
    Ok(Json(contract))
}

/// Whether the calling manager holds an accepted contract
pub async fn has_valid_contract(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;

    let valid = state
        .contract_service
        .has_accepted_contract(&auth.email)
        .await?;
    Ok(Json(valid))
}

pub async fn accept_contract(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    let contract = state
        .contract_service
        .set_status(id, Status::Accepted)
        .await?;
    Ok(Json(contract))
}

pub async fn reject_contract(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    let contract = state
        .contract_service
        .set_status(id, Status::Rejected)
        .await?;
    Ok(Json(contract))
}

pub async fn delete_contract(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    state.contract_service.delete(id).await?;
    Ok(Json(json!({"message": "Contract deleted successfully"})))
}
