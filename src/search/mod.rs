//! Global search module.
//!
//! - `scheduler` - cancellable timers (real threads or a manual clock)
//! - `backend` - where lookups are answered from
//! - `global` - the debounced search box state

pub mod backend;
pub mod global;
pub mod scheduler;

pub use backend::*;
pub use global::*;
pub use scheduler::*;
