//! Domain models.
//!
//! JSON documents exchanged with the case API. Field names follow the
//! API's camelCase wire format.

pub mod case;
pub mod floor_plan;
pub mod user;

pub use case::*;
pub use floor_plan::*;
pub use user::*;
