//! Notification module.
//!
//! Transient, dismissible user-facing messages:
//! - `center` - the ordered in-memory queue and its subscribers
//! - `sink` - the injection seam producers post through

pub mod center;
pub mod sink;

pub use center::*;
pub use sink::*;
