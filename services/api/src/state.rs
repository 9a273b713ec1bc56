//! Application state shared across handlers

use crate::jwt::JwtService;
use crate::services::{ContractService, EventService, ParticipationService, UserService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub user_service: UserService,
    pub contract_service: ContractService,
    pub event_service: EventService,
    pub participation_service: ParticipationService,
}
