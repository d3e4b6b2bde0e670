//! Core data models for the recipe service.
//!
//! Entities map to database tables via `sqlx::FromRow` and serialize as the
//! flat JSON records returned by the HTTP layer. Request payloads live in
//! [`requests`] and are validated into the `New*` inputs before storage.

pub mod ingredient;
pub mod recipe;
pub mod requests;
pub mod user;
