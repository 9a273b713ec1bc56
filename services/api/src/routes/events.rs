//! Event endpoints for managers and administrators

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{NewEvent, Privilege};
use crate::routes::IdQuery;
use crate::state::AppState;
use crate::validation::validate_new_event;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/manager", delete(delete_own_event))
        .route("/admin", delete(delete_event_as_admin))
}

/// Events owned by the calling manager
pub async fn list_events(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;

    let events = state.event_service.list_for_manager(&auth.email).await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<NewEvent>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;
    validate_new_event(&request).map_err(ApiError::Validation)?;

    let event = state.event_service.create(&auth.email, &request).await?;
    Ok(Json(event))
}

pub async fn delete_own_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::EventCreator)?;

    state.event_service.delete_owned(&auth.email, query.id).await?;
    Ok(Json(json!({"message": "Event deleted successfully"})))
}

pub async fn delete_event_as_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    state.event_service.delete_as_admin(query.id).await?;
    Ok(Json(json!({"message": "Event deleted successfully"})))
}
