//! Form validation.
//!
//! Required-field checks for the create-case, add-update and user forms,
//! plus an email shape check for the user form.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::{NewCase, NewUser, UserData};

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Field is required: {0}")]
    Required(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

pub fn validate_new_case(new_case: &NewCase) -> Result<(), ValidationError> {
    require("title", &new_case.title)?;
    require("description", &new_case.description)
}

pub fn validate_update_text(content: &str) -> Result<(), ValidationError> {
    require("content", content)
}

fn validate_user_fields(
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), ValidationError> {
    require("email", email)?;
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    require("firstName", first_name)?;
    require("lastName", last_name)
}

pub fn validate_new_user(user: &NewUser) -> Result<(), ValidationError> {
    validate_user_fields(&user.email, &user.first_name, &user.last_name)
}

pub fn validate_user(user: &UserData) -> Result<(), ValidationError> {
    validate_user_fields(&user.email, &user.first_name, &user.last_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_new_case_requires_both_fields() {
        let mut new_case = NewCase {
            title: "Server Outage".to_string(),
            description: String::new(),
        };
        assert_eq!(
            validate_new_case(&new_case),
            Err(ValidationError::Required("description"))
        );

        new_case.description = "Rack 4 down".to_string();
        assert!(validate_new_case(&new_case).is_ok());

        new_case.title = "   ".to_string();
        assert_eq!(validate_new_case(&new_case), Err(ValidationError::Required("title")));
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("admin@example.com"));
        assert!(!is_valid_email("admin@"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn test_new_user_validation() {
        let mut user = NewUser {
            email: "staff@example.com".to_string(),
            role: Role::Staff,
            first_name: "Staff".to_string(),
            last_name: "User".to_string(),
        };
        assert!(validate_new_user(&user).is_ok());

        user.email = "staff".to_string();
        assert_eq!(
            validate_new_user(&user),
            Err(ValidationError::InvalidEmail("staff".to_string()))
        );
    }
}
