//! Event ownership service

use std::sync::Arc;

use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{Event, NewEvent, Status};
use crate::repositories::{ContractsRepository, EventsRepository, UsersRepository};

/// Lifecycle rules for events and their ownership
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventsRepository>,
    users: Arc<dyn UsersRepository>,
    contracts: Arc<dyn ContractsRepository>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventsRepository>,
        users: Arc<dyn UsersRepository>,
        contracts: Arc<dyn ContractsRepository>,
    ) -> Self {
        Self {
            events,
            users,
            contracts,
        }
    }

    /// Events owned by the manager, ordered by ascending id
    pub async fn list_for_manager(&self, email: &str) -> ApiResult<Vec<Event>> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::user_not_found_by_email(email))?;

        Ok(self.events.find_by_owner(user.id).await?)
    }

    /// Create an event. The manager must hold at least one accepted
    /// contract; the check runs against the store on every call, so a
    /// contract rejected after an earlier acceptance closes the gate again.
    pub async fn create(&self, manager_email: &str, event: &NewEvent) -> ApiResult<Event> {
        let user = self
            .users
            .find_by_email(manager_email)
            .await?
            .ok_or_else(|| ApiError::user_not_found_by_email(manager_email))?;

        let accepted = self
            .contracts
            .find_by_user_and_status(user.id, Status::Accepted)
            .await?;
        if accepted.is_empty() {
            return Err(ApiError::Forbidden(format!(
                "Manager with email = {manager_email} has no approved contract"
            )));
        }

        Ok(self.events.insert(&user, event).await?)
    }

    /// Delete an event the manager owns, together with its participation
    /// requests
    pub async fn delete_owned(&self, manager_email: &str, event_id: i32) -> ApiResult<()> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(ApiError::EventNotFound(event_id))?;

        if event.user.email != manager_email {
            return Err(ApiError::Forbidden(format!(
                "Manager with email = {manager_email} is not the owner of event with id = {event_id}"
            )));
        }

        info!("Manager {} deleting event {}", manager_email, event_id);
        self.events.delete_cascading(event_id).await?;
        Ok(())
    }

    /// Delete any event, together with its participation requests
    pub async fn delete_as_admin(&self, event_id: i32) -> ApiResult<()> {
        info!("Admin deleting event {}", event_id);

        if !self.events.delete_cascading(event_id).await? {
            return Err(ApiError::EventNotFound(event_id));
        }
        Ok(())
    }
}
