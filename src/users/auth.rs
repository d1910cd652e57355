//! Auth state and view-mode gating.
//!
//! Sessions are owned elsewhere; this is the snapshot handed to the views
//! that need to know who is looking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Role-derived visibility tier of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Staff,
    Admin,
    Superadmin,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Staff => "staff",
            ViewMode::Admin => "admin",
            ViewMode::Superadmin => "superadmin",
        }
    }

    /// Capitalized label for the navbar.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Staff => "Staff",
            ViewMode::Admin => "Admin",
            ViewMode::Superadmin => "Superadmin",
        }
    }

    pub fn is_admin_tier(&self) -> bool {
        matches!(self, ViewMode::Admin | ViewMode::Superadmin)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(ViewMode::Staff),
            "admin" => Ok(ViewMode::Admin),
            "superadmin" => Ok(ViewMode::Superadmin),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    pub view_mode: ViewMode,
}

impl AuthState {
    pub fn signed_in(user: CurrentUser, view_mode: ViewMode) -> Self {
        Self {
            user: Some(user),
            view_mode,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.role == Role::Admin).unwrap_or(false)
    }

    pub fn view_mode_label(&self) -> &'static str {
        self.view_mode.label()
    }

    /// Navbar entries for this state; empty when signed out.
    pub fn nav_items(&self) -> Vec<NavItem> {
        if self.user.is_none() {
            return Vec::new();
        }
        nav_items(self.view_mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

const DASHBOARD: NavItem = NavItem { path: "/dashboard", label: "Dashboard" };
const CASES: NavItem = NavItem { path: "/cases", label: "Cases" };
const USERS: NavItem = NavItem { path: "/users", label: "Users" };
const FLOOR_PLANS: NavItem = NavItem { path: "/floor-plans", label: "Floor Plans" };
const FRANCHISES: NavItem = NavItem { path: "/franchises", label: "Franchises" };

/// Navigation entries visible in `mode`.
pub fn nav_items(mode: ViewMode) -> Vec<NavItem> {
    let mut items = vec![DASHBOARD, CASES];
    if mode.is_admin_tier() {
        items.push(USERS);
        items.push(FLOOR_PLANS);
    }
    if mode == ViewMode::Superadmin {
        items.push(FRANCHISES);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(mode: ViewMode) -> Vec<&'static str> {
        nav_items(mode).into_iter().map(|i| i.path).collect()
    }

    #[test]
    fn test_nav_gating() {
        assert_eq!(paths(ViewMode::Staff), vec!["/dashboard", "/cases"]);
        assert_eq!(
            paths(ViewMode::Admin),
            vec!["/dashboard", "/cases", "/users", "/floor-plans"]
        );
        assert_eq!(
            paths(ViewMode::Superadmin),
            vec!["/dashboard", "/cases", "/users", "/floor-plans", "/franchises"]
        );
    }

    #[test]
    fn test_signed_out_has_no_nav() {
        assert!(AuthState::default().nav_items().is_empty());
        assert!(!AuthState::default().is_admin());
    }

    #[test]
    fn test_view_mode_parse_and_label() {
        assert_eq!("superadmin".parse::<ViewMode>(), Ok(ViewMode::Superadmin));
        assert!("root".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Admin.label(), "Admin");
        let state = AuthState {
            user: None,
            view_mode: ViewMode::Superadmin,
        };
        assert_eq!(state.view_mode_label(), "Superadmin");
    }
}
