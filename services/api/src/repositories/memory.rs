//! In-memory implementation of the persistence ports
//!
//! Mirrors the join, ordering, cascade, and constraint semantics of the
//! PostgreSQL implementations. Backs the integration tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};

use crate::models::{
    Contract, Event, EventRef, NewEvent, NewParticipation, Participation, Role, Status, User,
    UserRef,
};

use super::{
    ContractsRepository, EventsRepository, ParticipationsRepository, RolesRepository,
    UsersRepository,
};

#[derive(Clone)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
    role_id: i32,
}

#[derive(Clone)]
struct ContractRow {
    id: i32,
    user_id: i32,
    status: Status,
}

#[derive(Clone)]
struct EventRow {
    id: i32,
    user_id: i32,
    name: String,
    description: String,
    price: i32,
}

#[derive(Clone)]
struct ParticipationRow {
    id: i32,
    user_id: i32,
    event_id: i32,
    status: Status,
    fio: String,
    age: i32,
    covid_passport_number: String,
}

#[derive(Default)]
struct Inner {
    roles: Vec<Role>,
    users: Vec<UserRow>,
    contracts: Vec<ContractRow>,
    events: Vec<EventRow>,
    participations: Vec<ParticipationRow>,
    role_seq: i32,
    user_seq: i32,
    contract_seq: i32,
    event_seq: i32,
    participation_seq: i32,
}

impl Inner {
    fn user_model(&self, row: &UserRow) -> Option<User> {
        let role = self.roles.iter().find(|r| r.id == row.role_id)?;
        Some(User {
            id: row.id,
            email: row.email.clone(),
            password_hash: row.password_hash.clone(),
            role: role.name.clone(),
        })
    }

    fn user_ref(&self, user_id: i32) -> Option<UserRef> {
        self.users.iter().find(|u| u.id == user_id).map(|u| UserRef {
            id: u.id,
            email: u.email.clone(),
        })
    }

    fn event_ref(&self, event_id: i32) -> Option<EventRef> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .map(|e| EventRef {
                id: e.id,
                name: e.name.clone(),
            })
    }

    fn contract_model(&self, row: &ContractRow) -> Option<Contract> {
        Some(Contract {
            id: row.id,
            user: self.user_ref(row.user_id)?,
            status: row.status,
        })
    }

    fn event_model(&self, row: &EventRow) -> Option<Event> {
        Some(Event {
            id: row.id,
            user: self.user_ref(row.user_id)?,
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price,
        })
    }

    fn participation_model(&self, row: &ParticipationRow) -> Option<Participation> {
        Some(Participation {
            id: row.id,
            user: self.user_ref(row.user_id)?,
            event: self.event_ref(row.event_id)?,
            status: row.status,
            fio: row.fio.clone(),
            age: row.age,
            covid_passport_number: row.covid_passport_number.clone(),
        })
    }
}

/// In-memory store implementing every persistence port
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// Store with the three built-in roles already seeded
    pub fn new() -> Self {
        let store = Self::unseeded();
        {
            let mut inner = store.lock();
            for name in ["ROLE_ADMIN", "ROLE_MANAGER", "ROLE_PARTICIPANT"] {
                inner.role_seq += 1;
                let id = inner.role_seq;
                inner.roles.push(Role {
                    id,
                    name: name.to_string(),
                });
            }
        }
        store
    }

    /// Store without any role rows
    pub fn unseeded() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RolesRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> DatabaseResult<Option<Role>> {
        let inner = self.lock();
        Ok(inner.roles.iter().find(|r| r.name == name).cloned())
    }
}

#[async_trait]
impl UsersRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let inner = self.lock();
        Ok(inner
            .users
            .iter()
            .find(|u| u.email == email)
            .and_then(|u| inner.user_model(u)))
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let inner = self.lock();
        Ok(inner
            .users
            .iter()
            .find(|u| u.id == id)
            .and_then(|u| inner.user_model(u)))
    }

    async fn find_by_role(&self, role: &str) -> DatabaseResult<Vec<User>> {
        let inner = self.lock();
        let mut users: Vec<User> = inner
            .users
            .iter()
            .filter_map(|u| inner.user_model(u))
            .filter(|u| u.role == role)
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn insert(&self, email: &str, password_hash: &str, role: &Role) -> DatabaseResult<User> {
        let mut inner = self.lock();

        if inner.users.iter().any(|u| u.email == email) {
            return Err(DatabaseError::Constraint {
                table: "users".to_string(),
                message: "duplicate key value violates unique constraint \"users_email_key\""
                    .to_string(),
            });
        }

        inner.user_seq += 1;
        let id = inner.user_seq;
        inner.users.push(UserRow {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role_id: role.id,
        });

        Ok(User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: role.name.clone(),
        })
    }

    async fn delete_cascading(&self, id: i32) -> DatabaseResult<bool> {
        let mut inner = self.lock();

        if !inner.users.iter().any(|u| u.id == id) {
            return Ok(false);
        }

        let owned_events: HashSet<i32> = inner
            .events
            .iter()
            .filter(|e| e.user_id == id)
            .map(|e| e.id)
            .collect();

        inner
            .participations
            .retain(|p| p.user_id != id && !owned_events.contains(&p.event_id));
        inner.contracts.retain(|c| c.user_id != id);
        inner.events.retain(|e| e.user_id != id);
        inner.users.retain(|u| u.id != id);

        Ok(true)
    }
}

#[async_trait]
impl ContractsRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Contract>> {
        let inner = self.lock();
        Ok(inner
            .contracts
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| inner.contract_model(c)))
    }

    async fn find_by_status(&self, status: Status) -> DatabaseResult<Vec<Contract>> {
        let inner = self.lock();
        let mut contracts: Vec<Contract> = inner
            .contracts
            .iter()
            .filter(|c| c.status == status)
            .filter_map(|c| inner.contract_model(c))
            .collect();
        contracts.sort_by_key(|c| c.id);
        Ok(contracts)
    }

    async fn find_by_user_and_status(
        &self,
        user_id: i32,
        status: Status,
    ) -> DatabaseResult<Vec<Contract>> {
        let inner = self.lock();
        let mut contracts: Vec<Contract> = inner
            .contracts
            .iter()
            .filter(|c| c.user_id == user_id && c.status == status)
            .filter_map(|c| inner.contract_model(c))
            .collect();
        contracts.sort_by_key(|c| c.id);
        Ok(contracts)
    }

    async fn insert(&self, user: &User, status: Status) -> DatabaseResult<Contract> {
        let mut inner = self.lock();

        inner.contract_seq += 1;
        let id = inner.contract_seq;
        inner.contracts.push(ContractRow {
            id,
            user_id: user.id,
            status,
        });

        Ok(Contract {
            id,
            user: UserRef::from(user),
            status,
        })
    }

    async fn update_status(&self, id: i32, status: Status) -> DatabaseResult<bool> {
        let mut inner = self.lock();
        match inner.contracts.iter_mut().find(|c| c.id == id) {
            Some(contract) => {
                contract.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i32) -> DatabaseResult<bool> {
        let mut inner = self.lock();
        let before = inner.contracts.len();
        inner.contracts.retain(|c| c.id != id);
        Ok(inner.contracts.len() < before)
    }
}

#[async_trait]
impl EventsRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Event>> {
        let inner = self.lock();
        Ok(inner
            .events
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| inner.event_model(e)))
    }

    async fn find_by_owner(&self, user_id: i32) -> DatabaseResult<Vec<Event>> {
        let inner = self.lock();
        let mut events: Vec<Event> = inner
            .events
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter_map(|e| inner.event_model(e))
            .collect();
        events.sort_by_key(|e| e.id);
        Ok(events)
    }

    async fn insert(&self, owner: &User, event: &NewEvent) -> DatabaseResult<Event> {
        let mut inner = self.lock();

        if event.price < 0 {
            return Err(DatabaseError::Constraint {
                table: "events".to_string(),
                message: "new row violates check constraint \"events_price_check\"".to_string(),
            });
        }

        inner.event_seq += 1;
        let id = inner.event_seq;
        inner.events.push(EventRow {
            id,
            user_id: owner.id,
            name: event.name.clone(),
            description: event.description.clone(),
            price: event.price,
        });

        Ok(Event {
            id,
            user: UserRef::from(owner),
            name: event.name.clone(),
            description: event.description.clone(),
            price: event.price,
        })
    }

    async fn delete_cascading(&self, id: i32) -> DatabaseResult<bool> {
        let mut inner = self.lock();

        if !inner.events.iter().any(|e| e.id == id) {
            return Ok(false);
        }

        inner.participations.retain(|p| p.event_id != id);
        inner.events.retain(|e| e.id != id);

        Ok(true)
    }
}

#[async_trait]
impl ParticipationsRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Participation>> {
        let inner = self.lock();
        Ok(inner
            .participations
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| inner.participation_model(p)))
    }

    async fn find_by_event_and_status(
        &self,
        event_id: i32,
        status: Status,
    ) -> DatabaseResult<Vec<Participation>> {
        let inner = self.lock();
        let mut requests: Vec<Participation> = inner
            .participations
            .iter()
            .filter(|p| p.event_id == event_id && p.status == status)
            .filter_map(|p| inner.participation_model(p))
            .collect();
        requests.sort_by_key(|p| p.id);
        Ok(requests)
    }

    async fn find_by_user(&self, user_id: i32) -> DatabaseResult<Vec<Participation>> {
        let inner = self.lock();
        let mut requests: Vec<Participation> = inner
            .participations
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| inner.participation_model(p))
            .collect();
        requests.sort_by_key(|p| p.id);
        Ok(requests)
    }

    async fn insert(
        &self,
        user: &User,
        event: &Event,
        status: Status,
        request: &NewParticipation,
    ) -> DatabaseResult<Participation> {
        let mut inner = self.lock();

        if !(0..=150).contains(&request.age) {
            return Err(DatabaseError::Constraint {
                table: "participation_requests".to_string(),
                message: "new row violates check constraint \"participation_requests_age_check\""
                    .to_string(),
            });
        }

        inner.participation_seq += 1;
        let id = inner.participation_seq;
        inner.participations.push(ParticipationRow {
            id,
            user_id: user.id,
            event_id: event.id,
            status,
            fio: request.fio.clone(),
            age: request.age,
            covid_passport_number: request.covid_passport_number.clone(),
        });

        Ok(Participation {
            id,
            user: UserRef::from(user),
            event: EventRef {
                id: event.id,
                name: event.name.clone(),
            },
            status,
            fio: request.fio.clone(),
            age: request.age,
            covid_passport_number: request.covid_passport_number.clone(),
        })
    }

    async fn update_status(&self, id: i32, status: Status) -> DatabaseResult<bool> {
        let mut inner = self.lock();
        match inner.participations.iter_mut().find(|p| p.id == id) {
            Some(request) => {
                request.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i32) -> DatabaseResult<bool> {
        let mut inner = self.lock();
        let before = inner.participations.len();
        inner.participations.retain(|p| p.id != id);
        Ok(inner.participations.len() < before)
    }
}
