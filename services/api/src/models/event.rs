//! Event model and creation payload

use serde::{Deserialize, Serialize};

use super::UserRef;

/// Event owned by a manager
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i32,
    pub user: UserRef,
    pub name: String,
    pub description: String,
    pub price: i32,
}

/// Event creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub price: i32,
}
