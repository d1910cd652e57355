//! Structured logging with session context.
//!
//! Provides logging macros and utilities that include the UI session id and,
//! where relevant, the case id in every log message for easy correlation.

pub mod structured;

pub use structured::*;
