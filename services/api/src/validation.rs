//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{NewEvent, NewParticipation};

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate an event creation payload
pub fn validate_new_event(event: &NewEvent) -> Result<(), String> {
    if event.name.trim().is_empty() {
        return Err("Event name is required".to_string());
    }

    if event.description.trim().is_empty() {
        return Err("Event description is required".to_string());
    }

    if event.price < 0 {
        return Err("Event price must not be negative".to_string());
    }

    Ok(())
}

/// Validate a participation request payload
pub fn validate_new_participation(request: &NewParticipation) -> Result<(), String> {
    if request.fio.trim().is_empty() {
        return Err("Full name is required".to_string());
    }

    if !(0..=150).contains(&request.age) {
        return Err("Age must be between 0 and 150".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.domain.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_new_event() {
        let event = NewEvent {
            name: "Concert".to_string(),
            description: "Open air".to_string(),
            price: 0,
        };
        assert!(validate_new_event(&event).is_ok());

        let unnamed = NewEvent {
            name: "  ".to_string(),
            ..event.clone()
        };
        assert!(validate_new_event(&unnamed).is_err());

        let negative = NewEvent {
            price: -1,
            ..event.clone()
        };
        assert!(validate_new_event(&negative).is_err());
    }

    #[test]
    fn test_validate_new_participation() {
        let request = NewParticipation {
            event_id: 1,
            fio: "Ivanov Ivan".to_string(),
            age: 30,
            covid_passport_number: String::new(),
        };
        assert!(validate_new_participation(&request).is_ok());

        let anonymous = NewParticipation {
            fio: String::new(),
            ..request.clone()
        };
        assert!(validate_new_participation(&anonymous).is_err());

        let too_old = NewParticipation {
            age: 151,
            ..request.clone()
        };
        assert!(validate_new_participation(&too_old).is_err());

        let negative_age = NewParticipation {
            age: -1,
            ..request
        };
        assert!(validate_new_participation(&negative_age).is_err());
    }
}
