//! Domain services carrying the lifecycle rules
//!
//! Role and privilege checks live at the HTTP boundary; these services own
//! the ownership and contract-gating rules and the cascading deletes.

pub mod contracts;
pub mod events;
pub mod participations;
pub mod users;

// Re-export for convenience
pub use contracts::ContractService;
pub use events::EventService;
pub use participations::ParticipationService;
pub use users::UserService;
