//! Authentication middleware for JWT token validation

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use tracing::warn;

use crate::error::ApiError;
use crate::models::{Privilege, RoleName};
use crate::state::AppState;

/// Authenticated principal resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub role: RoleName,
}

impl AuthUser {
    /// Boundary privilege check; protected handlers call this before
    /// touching a service
    pub fn require(&self, privilege: Privilege) -> Result<(), ApiError> {
        if self.role.has_privilege(privilege) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Access requires {}",
                privilege.as_str()
            )))
        }
    }
}

/// Authentication middleware
///
/// Validates the bearer token and re-resolves the user from the store on
/// every request, so tokens of deleted users stop working immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Validate the token
    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        warn!("Rejected token: {}", e);
        ApiError::Unauthorized
    })?;

    // Resolve the principal from the store
    let user = state
        .user_service
        .find_by_email(&claims.sub)
        .await
        .map_err(|_| ApiError::Unauthorized)?;

    let role = RoleName::parse(&user.role).ok_or(ApiError::Unauthorized)?;

    // Insert the user into the request extensions
    req.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        role,
    });

    // Call the next service
    let response = next.run(req).await;

    Ok(response)
}
