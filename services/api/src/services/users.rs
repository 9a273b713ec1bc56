//! User account service: registration, login, listings, deletion

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{RegisterUser, Role, RoleName, User};
use crate::repositories::{RolesRepository, UsersRepository};

/// Account lifecycle rules for users of every role
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UsersRepository>,
    roles: Arc<dyn RolesRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UsersRepository>, roles: Arc<dyn RolesRepository>) -> Self {
        Self { users, roles }
    }

    /// Register a manager account
    pub async fn register_manager(&self, request: &RegisterUser) -> ApiResult<User> {
        self.register(request, RoleName::Manager).await
    }

    /// Register a participant account
    pub async fn register_participant(&self, request: &RegisterUser) -> ApiResult<User> {
        self.register(request, RoleName::Participant).await
    }

    async fn register(&self, request: &RegisterUser, role: RoleName) -> ApiResult<User> {
        info!("Registering {} as {}", request.email, role.as_str());

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(ApiError::Validation(format!(
                "User with email = {} already exists",
                request.email
            )));
        }

        if request.password != request.confirm_password {
            return Err(ApiError::Validation(
                "Password and confirmation do not match".to_string(),
            ));
        }

        let role = self.lookup_role(role).await?;
        let password_hash = hash_password(&request.password)?;

        let user = self
            .users
            .insert(&request.email, &password_hash, &role)
            .await?;
        Ok(user)
    }

    /// Verify login credentials, resolving the stored user on success
    ///
    /// Every failure surfaces as `InvalidCredentials`; the caller cannot
    /// tell an unknown email from a wrong password.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> ApiResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| ApiError::InvalidCredentials)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| ApiError::InvalidCredentials)?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> ApiResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::user_not_found_by_email(email))
    }

    /// Users holding the role, ordered by ascending id
    pub async fn list_by_role(&self, role: RoleName) -> ApiResult<Vec<User>> {
        Ok(self.users.find_by_role(role.as_str()).await?)
    }

    /// Delete a user together with their contracts, events, own
    /// participation requests, and requests filed against their events
    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        info!("Deleting user {}", id);

        if !self.users.delete_cascading(id).await? {
            return Err(ApiError::user_not_found_by_id(id));
        }
        Ok(())
    }

    /// Create the administrator account at startup when it does not exist yet
    pub async fn ensure_admin(&self, email: &str, password: &str) -> ApiResult<()> {
        if self.users.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        info!("Seeding administrator account {}", email);

        let role = self.lookup_role(RoleName::Admin).await?;
        let password_hash = hash_password(password)?;
        self.users.insert(email, &password_hash, &role).await?;
        Ok(())
    }

    async fn lookup_role(&self, role: RoleName) -> ApiResult<Role> {
        self.roles
            .find_by_name(role.as_str())
            .await?
            .ok_or_else(|| ApiError::RoleNotConfigured(role.as_str().to_string()))
    }
}

fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}
