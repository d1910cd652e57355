//! Case API collaborator.
//!
//! The REST endpoints are owned by the server; this module only consumes
//! them. Everything above it talks to the [`CaseApi`] trait so views can be
//! driven by the HTTP client in production and the in-memory backend in
//! tests.

pub mod client;
pub mod error;
pub mod memory;

pub use client::*;
pub use error::*;
pub use memory::*;
