//! HTTP routes for the event manager service
//!
//! Authorization is split in one place each: the auth middleware plus the
//! `require` calls in handlers own the privilege checks, the domain
//! services own ownership and contract gating.

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde::Deserialize;
use serde_json::json;

use crate::middleware::auth_middleware;
use crate::state::AppState;

pub mod auth;
pub mod contracts;
pub mod events;
pub mod participations;
pub mod users;

/// Query parameter carrying a target record id
#[derive(Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

/// Create the router for the event manager service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .nest("/api/v1/user", users::router())
        .nest("/api/v1/contract", contracts::router())
        .nest(
            "/api/v1/event",
            events::router().nest("/participation", participations::router()),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/auth", auth::router())
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "event-manager"
    }))
}
