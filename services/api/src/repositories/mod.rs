//! Persistence ports and their implementations
//!
//! Each entity gets a small `async_trait` port so the domain services stay
//! independent of the backing store. `Pg*` types talk to PostgreSQL;
//! `InMemoryStore` implements every port for tests.

pub mod contracts;
pub mod events;
#[cfg(test)]
pub mod memory;
pub mod participations;
pub mod roles;
pub mod users;

// Re-export for convenience
pub use contracts::{ContractsRepository, PgContractsRepository};
pub use events::{EventsRepository, PgEventsRepository};
#[cfg(test)]
pub use memory::InMemoryStore;
pub use participations::{ParticipationsRepository, PgParticipationsRepository};
pub use roles::{PgRolesRepository, RolesRepository};
pub use users::{PgUsersRepository, UsersRepository};
