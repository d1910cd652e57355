//! Floor-plan incident pinning.
//!
//! - `annotator` - click-to-coordinate mapping and the save flow
//! - `detail` - case detail view state with stale-response guarding

pub mod annotator;
pub mod detail;

pub use annotator::*;
pub use detail::*;
