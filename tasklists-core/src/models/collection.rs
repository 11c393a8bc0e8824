/// TaskCollection and Share models
///
/// A collection is owned by exactly one user (immutable after creation)
/// and may be shared with up to [`MAX_SHARES`] additional users. The share
/// list never contains duplicate user ids and preserves insertion order
/// for stable display. Task items and shares are cascade-deleted with
/// their collection.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_collections (
///     id UUID PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     owner_id UUID NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE shares (
///     task_collection_id UUID NOT NULL REFERENCES task_collections(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (task_collection_id, user_id)
/// );
/// ```
///
/// # Example
///
/// ```
/// use tasklists_core::models::collection::{TaskCollection, MAX_SHARES};
/// use uuid::Uuid;
///
/// let owner = Uuid::new_v4();
/// let mut collection = TaskCollection::new("Weekend plans", owner);
///
/// for _ in 0..5 {
///     collection.add_share(Uuid::new_v4());
/// }
///
/// // The mutator never lets the share list exceed the cap
/// assert_eq!(collection.shares.len(), MAX_SHARES);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hard cap on the number of shared (non-owner) users per collection
pub const MAX_SHARES: usize = 3;

/// A grant of access to a non-owner user
///
/// Identity is the composite `(task_collection_id, user_id)`; a share is
/// created by a share operation and destroyed by unshare or together with
/// its collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Share {
    /// Collection this share belongs to
    pub task_collection_id: Uuid,

    /// The user granted access
    pub user_id: Uuid,

    /// When the share was granted
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Creates a new share for a collection
    pub fn new(task_collection_id: Uuid, user_id: Uuid) -> Self {
        Self {
            task_collection_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// A collection of tasks owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCollection {
    /// Unique collection ID (UUID v4)
    pub id: Uuid,

    /// Display name (1-255 characters)
    pub name: String,

    /// The owning user; immutable after creation
    pub owner_id: Uuid,

    /// When the collection was created
    pub created_at: DateTime<Utc>,

    /// Users the collection is shared with, in insertion order
    pub shares: Vec<Share>,
}

impl TaskCollection {
    /// Creates a new collection with a fresh id and an empty share list
    pub fn new(name: impl Into<String>, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            owner_id,
            created_at: Utc::now(),
            shares: Vec::new(),
        }
    }

    /// Checks whether `user_id` is the owner
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Checks whether the collection is shared with `user_id`
    pub fn is_shared_with(&self, user_id: Uuid) -> bool {
        self.shares.iter().any(|s| s.user_id == user_id)
    }

    /// Authorization predicate for read, rename, share, and unshare
    ///
    /// True when `user_id` is the owner or appears in the share list.
    /// Deletion is gated by the stricter [`TaskCollection::is_owner`].
    pub fn can_access(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id) || self.is_shared_with(user_id)
    }

    /// Renames the collection
    ///
    /// Blank input is silently ignored; the name stays unchanged. The
    /// name is therefore never empty after a rename.
    pub fn rename(&mut self, new_name: &str) {
        if !new_name.trim().is_empty() {
            self.name = new_name.to_string();
        }
    }

    /// Adds a share for `user_id` if not already present and under the cap
    ///
    /// Returns true when a new share was appended. Idempotent: an already
    /// shared user leaves the list unchanged.
    pub fn add_share(&mut self, user_id: Uuid) -> bool {
        if self.is_shared_with(user_id) || self.shares.len() >= MAX_SHARES {
            return false;
        }
        self.shares.push(Share::new(self.id, user_id));
        true
    }

    /// Removes the share for `user_id` if present
    ///
    /// Idempotent: removing a user who is not shared is a no-op.
    pub fn remove_share(&mut self, user_id: Uuid) {
        self.shares.retain(|s| s.user_id != user_id);
    }
}
