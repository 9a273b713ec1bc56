//! Review status shared by contracts and participation requests

use serde::{Deserialize, Serialize};

/// Review status of a contract or participation request
///
/// Stored as its integer discriminant; serialized as the uppercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[repr(i32)]
pub enum Status {
    Pending = 0,
    Rejected = 1,
    Accepted = 2,
}
