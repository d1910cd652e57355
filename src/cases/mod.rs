//! Case list module.
//!
//! - `filter` - status/search predicates over the fetched cases
//! - `pagination` - fixed-size pages and the "Showing x to y of z" summary
//! - `store` - the case list state (fetch, create, filter, paginate)
//! - `stats` - dashboard counters derived from the case list

pub mod filter;
pub mod pagination;
pub mod stats;
pub mod store;

pub use filter::*;
pub use pagination::*;
pub use stats::*;
pub use store::*;
