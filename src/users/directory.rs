//! User directory.
//!
//! Local list of users with add / edit / delete. Every operation requires
//! the current user to be an admin.

use chrono::Utc;
use thiserror::Error;

use crate::logging::structured::LogContext;
use crate::models::{NewUser, Role, UserData};
use crate::validation::form::{validate_new_user, validate_user, ValidationError};

use super::auth::AuthState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UserError {
    #[error("You do not have permission to access this page.")]
    PermissionDenied,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<UserData>,
    last_id: i64,
    log_ctx: LogContext,
}

impl UserDirectory {
    pub fn new(log_ctx: LogContext) -> Self {
        Self {
            users: Vec::new(),
            last_id: 0,
            log_ctx,
        }
    }

    /// Directory pre-filled with one admin, one manager and one staff user.
    pub fn with_demo_users(log_ctx: LogContext) -> Self {
        let mut dir = Self::new(log_ctx);
        let seed = [
            ("1", "admin@example.com", Role::Admin, "Admin"),
            ("2", "manager@example.com", Role::Manager, "Manager"),
            ("3", "staff@example.com", Role::Staff, "Staff"),
        ];
        dir.users = seed
            .iter()
            .map(|(id, email, role, first)| UserData {
                id: id.to_string(),
                email: email.to_string(),
                role: *role,
                first_name: first.to_string(),
                last_name: "User".to_string(),
            })
            .collect();
        dir
    }

    fn authorize(&self, auth: &AuthState, op: &str) -> Result<(), UserError> {
        if auth.is_admin() {
            return Ok(());
        }
        log::warn!(
            "{} USER_PERMISSION_DENIED op={} user={:?}",
            self.log_ctx,
            op,
            auth.user.as_ref().map(|u| u.id.as_str())
        );
        Err(UserError::PermissionDenied)
    }

    pub fn list(&self, auth: &AuthState) -> Result<&[UserData], UserError> {
        self.authorize(auth, "list")?;
        Ok(&self.users)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Millisecond timestamp id, bumped so two adds in the same
    /// millisecond still get distinct ids.
    fn next_id(&mut self) -> String {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }

    pub fn add(&mut self, auth: &AuthState, new_user: NewUser) -> Result<UserData, UserError> {
        self.authorize(auth, "add")?;
        validate_new_user(&new_user)?;

        let user = UserData {
            id: self.next_id(),
            email: new_user.email,
            role: new_user.role,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
        };
        log::info!("{} USER_ADDED id={} role={}", self.log_ctx, user.id, user.role);
        self.users.push(user.clone());
        Ok(user)
    }

    /// Replace the user with the same id.
    pub fn update(&mut self, auth: &AuthState, user: UserData) -> Result<(), UserError> {
        self.authorize(auth, "update")?;
        validate_user(&user)?;

        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.clone()))?;
        log::info!("{} USER_UPDATED id={} role={}", self.log_ctx, user.id, user.role);
        *slot = user;
        Ok(())
    }

    pub fn delete(&mut self, auth: &AuthState, id: &str) -> Result<UserData, UserError> {
        self.authorize(auth, "delete")?;
        let pos = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        log::info!("{} USER_DELETED id={}", self.log_ctx, id);
        Ok(self.users.remove(pos))
    }
}
