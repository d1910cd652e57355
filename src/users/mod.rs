//! Users module.
//!
//! - `auth` - the injected auth state and the view-mode navigation gate
//! - `directory` - admin-only user list management

pub mod auth;
pub mod directory;

pub use auth::*;
pub use directory::*;
