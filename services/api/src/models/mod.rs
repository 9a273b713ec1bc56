//! Domain models for the event manager service

pub mod contract;
pub mod event;
pub mod participation;
pub mod role;
pub mod status;
pub mod user;

// Re-export for convenience
pub use contract::Contract;
pub use event::{Event, NewEvent};
pub use participation::{EventRef, NewParticipation, Participation};
pub use role::{Privilege, Role, RoleName};
pub use status::Status;
pub use user::{LoginCredentials, RegisterUser, User, UserRef};
