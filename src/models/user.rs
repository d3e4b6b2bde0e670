//! Represents a recipe owner.

use serde::Serialize;
use sqlx::FromRow;

/// Username of the sentinel owner every new recipe is assigned to.
pub const DEFAULT_USERNAME: &str = "default";

/// Email of the sentinel owner.
pub const DEFAULT_EMAIL: &str = "default@example.com";

pub const USERNAME_MAX_LEN: usize = 80;
pub const EMAIL_MAX_LEN: usize = 120;

/// A user that owns recipes.
///
/// Users are only ever created (at startup for the default user, or via
/// `POST /api/users`); no operation updates or deletes them.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct User {
    /// System-assigned primary key.
    pub id: i64,

    /// Globally unique login name.
    pub username: String,

    /// Globally unique email address.
    pub email: String,
}

/// Validated input for inserting a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}
