//! Shared domain types for the UGUS administrative backend.
//!
//! Pure types only: no database or HTTP dependencies. The `db` and `api`
//! crates both build on what lives here.

pub mod error;
pub mod types;
pub mod validation;
