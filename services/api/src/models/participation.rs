//! Participation request model and creation payload

use serde::{Deserialize, Serialize};

use super::{Status, UserRef};

/// Public reference to an event, embedded in participation requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    pub id: i32,
    pub name: String,
}

/// A participant's request to join an event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: i32,
    pub user: UserRef,
    pub event: EventRef,
    pub status: Status,
    pub fio: String,
    pub age: i32,
    pub covid_passport_number: String,
}

/// Participation request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipation {
    pub event_id: i32,
    pub fio: String,
    pub age: i32,
    #[serde(default)]
    pub covid_passport_number: String,
}
