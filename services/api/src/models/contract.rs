//! Contract model

use serde::Serialize;

use super::{Status, UserRef};

/// Contract between a manager and the platform
#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    pub id: i32,
    pub user: UserRef,
    pub status: Status,
}
