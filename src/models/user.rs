//! User records and roles.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

impl UserData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields of the add-user form; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            email: String::new(),
            role: Role::Staff,
            first_name: String::new(),
            last_name: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_format() {
        let user: UserData = serde_json::from_str(
            r#"{"id": "1", "email": "admin@example.com", "role": "admin", "firstName": "Admin", "lastName": "User"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.full_name(), "Admin User");
    }

    #[test]
    fn test_new_user_defaults_to_staff() {
        assert_eq!(NewUser::default().role, Role::Staff);
    }
}
