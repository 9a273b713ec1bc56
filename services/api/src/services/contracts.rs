//! Contract workflow service

use std::sync::Arc;

use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{Contract, Status};
use crate::repositories::{ContractsRepository, UsersRepository};

/// Lifecycle rules for contracts between managers and the platform
#[derive(Clone)]
pub struct ContractService {
    contracts: Arc<dyn ContractsRepository>,
    users: Arc<dyn UsersRepository>,
}

impl ContractService {
    pub fn new(contracts: Arc<dyn ContractsRepository>, users: Arc<dyn UsersRepository>) -> Self {
        Self { contracts, users }
    }

    /// Contracts in the given status, ordered by ascending id
    pub async fn list_by_status(&self, status: Status) -> ApiResult<Vec<Contract>> {
        Ok(self.contracts.find_by_status(status).await?)
    }

    /// File a new contract for the manager; always starts pending.
    /// Duplicate contracts for the same manager are allowed.
    pub async fn create(&self, manager_email: &str) -> ApiResult<Contract> {
        info!("Filing contract for manager {}", manager_email);

        let user = self
            .users
            .find_by_email(manager_email)
            .await?
            .ok_or_else(|| ApiError::user_not_found_by_email(manager_email))?;

        Ok(self.contracts.insert(&user, Status::Pending).await?)
    }

    /// Move a contract to the given status. Any current status is a valid
    /// starting point; accepted contracts can be rejected again.
    pub async fn set_status(&self, id: i32, status: Status) -> ApiResult<Contract> {
        let contract = self
            .contracts
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ContractNotFound(id))?;

        if !self.contracts.update_status(id, status).await? {
            return Err(ApiError::ContractNotFound(id));
        }

        Ok(Contract { status, ..contract })
    }

    /// Whether the manager currently holds at least one accepted contract
    pub async fn has_accepted_contract(&self, email: &str) -> ApiResult<bool> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::user_not_found_by_email(email))?;

        let accepted = self
            .contracts
            .find_by_user_and_status(user.id, Status::Accepted)
            .await?;
        Ok(!accepted.is_empty())
    }

    /// Delete a contract regardless of its status
    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        if !self.contracts.delete_by_id(id).await? {
            return Err(ApiError::ContractNotFound(id));
        }
        Ok(())
    }
}
