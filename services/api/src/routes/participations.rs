//! Participation request endpoints
//!
//! Participants create and withdraw their own requests; managers review
//! requests against events they own; administrators can remove any request.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch},
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{NewParticipation, Participation, Privilege, Status};
use crate::routes::IdQuery;
use crate::state::AppState;
use crate::validation::validate_new_participation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIdQuery {
    pub event_id: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/pending", get(list_pending))
        .route("/rejected", get(list_rejected))
        .route("/accepted", get(list_accepted))
        .route("/accept/:id", patch(accept_request))
        .route("/reject/:id", patch(reject_request))
        .route("/participant", delete(delete_own_request))
        .route("/admin", delete(delete_request_as_admin))
}

/// Requests filed by the calling participant, across all events
pub async fn list_own_requests(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::Participant)?;

    let requests = state
        .participation_service
        .list_for_participant(&auth.email)
        .await?;
    Ok(Json(requests))
}

pub async fn create_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<NewParticipation>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::Participant)?;
    validate_new_participation(&request).map_err(ApiError::Validation)?;

    let participation = state
        .participation_service
        .create(&auth.email, &request)
        .await?;
    Ok(Json(participation))
}

pub async fn list_pending(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<EventIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_status(state, auth, query.event_id, Status::Pending).await
}

pub async fn list_rejected(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<EventIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_status(state, auth, query.event_id, Status::Rejected).await
}

pub async fn list_accepted(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<EventIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_status(state, auth, query.event_id, Status::Accepted).await
}

async fn list_by_status(
    state: AppState,
    auth: AuthUser,
    event_id: i32,
    status: Status,
) -> Result<Json<Vec<Participation>>, ApiError> {
    auth.require(Privilege::EventCreator)?;

    let requests = state
        .participation_service
        .list_by_event_and_status(&auth.email, event_id, status)
        .await?;
    Ok(Json(requests))
}

pub async fn accept_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;

    let request = state
        .participation_service
        .set_status(&auth.email, id, Status::Accepted)
        .await?;
    Ok(Json(request))
}

pub async fn reject_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;

    let request = state
        .participation_service
        .set_status(&auth.email, id, Status::Rejected)
        .await?;
    Ok(Json(request))
}

pub async fn delete_own_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::Participant)?;

    state
        .participation_service
        .delete_owned(&auth.email, query.id)
        .await?;
    Ok(Json(
        json!({"message": "Participation request deleted successfully"}),
    ))
}

pub async fn delete_request_as_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    state.participation_service.delete_as_admin(query.id).await?;
    Ok(Json(
        json!({"message": "Participation request deleted successfully"}),
    ))
}
