//! User directory and account endpoints

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use super::IdQuery;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Privilege, RoleName, UserRef};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_user).delete(delete_user))
        .route("/admins", get(list_admins))
        .route("/managers", get(list_managers))
        .route("/participants", get(list_participants))
}

/// Profile of the authenticated user, as resolved by the auth middleware
pub async fn current_user(Extension(auth): Extension<AuthUser>) -> impl IntoResponse {
    Json(UserRef {
        id: auth.id,
        email: auth.email,
    })
}

pub async fn list_admins(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_role(state, auth, RoleName::Admin).await
}

pub async fn list_managers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_role(state, auth, RoleName::Manager).await
}

pub async fn list_participants(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    list_by_role(state, auth, RoleName::Participant).await
}

async fn list_by_role(
    state: AppState,
    auth: AuthUser,
    role: RoleName,
) -> Result<Json<Vec<UserRef>>, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    let users = state.user_service.list_by_role(role).await?;
    Ok(Json(users.iter().map(UserRef::from).collect()))
}

/// Delete a user together with everything they own
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(Privilege::AppAdmin)?;

    state.user_service.delete(query.id).await?;
    Ok(Json(json!({"message": "User deleted successfully"})))
}
