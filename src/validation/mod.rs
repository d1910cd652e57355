//! Input validation module.
//!
//! - `form` - required-field and email checks run before any API call
//! - `sanitizer` - injection pattern screening of free text

pub mod form;
pub mod sanitizer;

pub use form::*;
pub use sanitizer::*;
