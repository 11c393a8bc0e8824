/// User model
///
/// Users are identity only: an id and a display name. Collections and
/// shares reference users by id; a user never embeds the collections it
/// owns or the shares granted to it. Back-references are lookups through
/// the stores, not ownership.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY,
///     name VARCHAR(255) NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account, referenced by id from collections and shares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name (non-empty)
    pub name: String,
}

impl User {
    /// Creates a new user with a fresh id
    ///
    /// Returns `None` if the name is blank.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            name,
        })
    }
}
