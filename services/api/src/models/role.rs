//! Role model, role names, and the static privilege mapping

use serde::{Deserialize, Serialize};

/// Role entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

/// The three built-in roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleName {
    Admin,
    Manager,
    Participant,
}

impl RoleName {
    /// Role name as stored in the roles table
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ROLE_ADMIN",
            RoleName::Manager => "ROLE_MANAGER",
            RoleName::Participant => "ROLE_PARTICIPANT",
        }
    }

    /// Parse a stored role name
    pub fn parse(name: &str) -> Option<RoleName> {
        match name {
            "ROLE_ADMIN" => Some(RoleName::Admin),
            "ROLE_MANAGER" => Some(RoleName::Manager),
            "ROLE_PARTICIPANT" => Some(RoleName::Participant),
            _ => None,
        }
    }

    /// Privileges granted to the role
    pub fn privileges(&self) -> &'static [Privilege] {
        match self {
            RoleName::Admin => &[Privilege::AppAdmin],
            RoleName::Manager => &[Privilege::EventCreator],
            RoleName::Participant => &[Privilege::Participant],
        }
    }

    pub fn has_privilege(&self, privilege: Privilege) -> bool {
        self.privileges().contains(&privilege)
    }
}

/// Privileges checked at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    AppAdmin,
    EventCreator,
    Participant,
}

impl Privilege {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::AppAdmin => "PRIVILEGE_APP_ADMIN",
            Privilege::EventCreator => "PRIVILEGE_EVENT_CREATOR",
            Privilege::Participant => "PRIVILEGE_PARTICIPANT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_round_trip() {
        for role in [RoleName::Admin, RoleName::Manager, RoleName::Participant] {
            assert_eq!(RoleName::parse(role.as_str()), Some(role));
        }
        assert_eq!(RoleName::parse("ROLE_UNKNOWN"), None);
    }

    #[test]
    fn test_privilege_mapping() {
        assert!(RoleName::Admin.has_privilege(Privilege::AppAdmin));
        assert!(!RoleName::Admin.has_privilege(Privilege::EventCreator));
        assert!(RoleName::Manager.has_privilege(Privilege::EventCreator));
        assert!(!RoleName::Manager.has_privilege(Privilege::Participant));
        assert!(RoleName::Participant.has_privilege(Privilege::Participant));
        assert!(!RoleName::Participant.has_privilege(Privilege::AppAdmin));
    }
}
