//! Participation workflow service

use std::sync::Arc;

use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewParticipation, Participation, Status, User};
use crate::repositories::{EventsRepository, ParticipationsRepository, UsersRepository};

/// Lifecycle rules for participation requests
#[derive(Clone)]
pub struct ParticipationService {
    participations: Arc<dyn ParticipationsRepository>,
    events: Arc<dyn EventsRepository>,
    users: Arc<dyn UsersRepository>,
}

impl ParticipationService {
    pub fn new(
        participations: Arc<dyn ParticipationsRepository>,
        events: Arc<dyn EventsRepository>,
        users: Arc<dyn UsersRepository>,
    ) -> Self {
        Self {
            participations,
            events,
            users,
        }
    }

    /// Requests for an event in the given status, ordered by ascending id.
    /// The caller must be the event's owner; a foreign or unknown event id
    /// is rejected the same way.
    pub async fn list_by_event_and_status(
        &self,
        manager_email: &str,
        event_id: i32,
        status: Status,
    ) -> ApiResult<Vec<Participation>> {
        let manager = self.resolve_user(manager_email).await?;
        self.ensure_owns_event(&manager, event_id).await?;

        Ok(self
            .participations
            .find_by_event_and_status(event_id, status)
            .await?)
    }

    /// Requests filed by the participant, ordered by ascending id
    pub async fn list_for_participant(&self, email: &str) -> ApiResult<Vec<Participation>> {
        let user = self.resolve_user(email).await?;
        Ok(self.participations.find_by_user(user.id).await?)
    }

    /// File a request to join an event; always starts pending. A
    /// participant may file several requests for the same event.
    pub async fn create(
        &self,
        participant_email: &str,
        request: &NewParticipation,
    ) -> ApiResult<Participation> {
        let user = self.resolve_user(participant_email).await?;
        let event = self
            .events
            .find_by_id(request.event_id)
            .await?
            .ok_or(ApiError::EventNotFound(request.event_id))?;

        info!(
            "Participant {} requesting to join event {}",
            participant_email, event.id
        );

        Ok(self
            .participations
            .insert(&user, &event, Status::Pending, request)
            .await?)
    }

    /// Move a request to the given status; the caller must own the event
    /// the request points at
    pub async fn set_status(
        &self,
        manager_email: &str,
        id: i32,
        status: Status,
    ) -> ApiResult<Participation> {
        let request = self
            .participations
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ParticipationNotFound(id))?;

        let manager = self.resolve_user(manager_email).await?;
        self.ensure_owns_event(&manager, request.event.id).await?;

        if !self.participations.update_status(id, status).await? {
            return Err(ApiError::ParticipationNotFound(id));
        }

        Ok(Participation { status, ..request })
    }

    /// Delete a request the participant filed themselves
    pub async fn delete_owned(&self, participant_email: &str, id: i32) -> ApiResult<()> {
        let request = self
            .participations
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ParticipationNotFound(id))?;

        if request.user.email != participant_email {
            return Err(ApiError::Forbidden(format!(
                "Participant with email = {participant_email} is not the owner of participation request with id = {id}"
            )));
        }

        info!(
            "Participant {} withdrawing participation request {}",
            participant_email, id
        );
        self.participations.delete_by_id(id).await?;
        Ok(())
    }

    /// Delete any request
    pub async fn delete_as_admin(&self, id: i32) -> ApiResult<()> {
        info!("Admin deleting participation request {}", id);

        if !self.participations.delete_by_id(id).await? {
            return Err(ApiError::ParticipationNotFound(id));
        }
        Ok(())
    }

    async fn resolve_user(&self, email: &str) -> ApiResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::user_not_found_by_email(email))
    }

    /// Ownership is decided by membership in the manager's owned-event
    /// list, so an unknown event id fails like a foreign one.
    async fn ensure_owns_event(&self, manager: &User, event_id: i32) -> ApiResult<()> {
        let owned = self.events.find_by_owner(manager.id).await?;
        if !owned.iter().any(|e| e.id == event_id) {
            return Err(ApiError::Forbidden(format!(
                "Manager with email = {} does not own event with id = {}",
                manager.email, event_id
            )));
        }
        Ok(())
    }
}
