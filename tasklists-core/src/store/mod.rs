/// Store contracts for TaskLists
///
/// The services treat persistence as an external collaborator: an opaque
/// key-value-by-id store per entity type, injected at construction. Two
/// implementations are provided:
///
/// - [`postgres`]: sqlx-backed Postgres stores
/// - [`memory`]: an in-memory store for tests and database-less operation
///
/// # Required collaborator guarantee
///
/// The share cap (`|shares| <= 3`) is checked by the service before it
/// writes, but check-then-act is not atomic across concurrent calls. The
/// store must therefore make the append conditional: the Postgres store
/// uses the `(task_collection_id, user_id)` primary key plus a
/// count-guarded insert, and reports [`StoreError::ShareCapExceeded`]
/// when a racing writer already filled the last slot. The in-memory store
/// validates the invariant under its single write lock.
///
/// `commit` may batch prior mutations; both provided implementations
/// apply writes eagerly and treat `commit` as a checkpoint no-op.

pub mod memory;
pub mod postgres;
pub mod seed;

use crate::models::collection::TaskCollection;
use crate::models::task_item::TaskItem;
use crate::models::user::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Errors surfaced by store implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A share write would push a collection past the cap
    #[error("share limit reached for collection {0}")]
    ShareCapExceeded(Uuid),
}

/// Store contract for task collections (including their share list)
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Loads a collection with its shares, or `None` if absent
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskCollection>, StoreError>;

    /// Loads every collection with its shares
    async fn get_all(&self) -> Result<Vec<TaskCollection>, StoreError>;

    /// Persists a newly created collection
    async fn add(&self, collection: &TaskCollection) -> Result<(), StoreError>;

    /// Persists name and share-list changes to an existing collection
    async fn update(&self, collection: &TaskCollection) -> Result<(), StoreError>;

    /// Deletes a collection, cascading to its shares and task items
    async fn delete(&self, collection: &TaskCollection) -> Result<(), StoreError>;

    /// Flushes any batched writes
    async fn commit(&self) -> Result<(), StoreError>;
}

/// Store contract for task items
#[async_trait]
pub trait TaskItemStore: Send + Sync {
    /// Loads a task item, or `None` if absent
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskItem>, StoreError>;

    /// Loads all items of a collection, oldest first
    async fn get_by_collection(&self, collection_id: Uuid) -> Result<Vec<TaskItem>, StoreError>;

    /// Persists a newly created item
    async fn add(&self, item: &TaskItem) -> Result<(), StoreError>;

    /// Persists changes to an existing item
    async fn update(&self, item: &TaskItem) -> Result<(), StoreError>;

    /// Deletes an item
    async fn delete(&self, item: &TaskItem) -> Result<(), StoreError>;

    /// Flushes any batched writes
    async fn commit(&self) -> Result<(), StoreError>;
}

/// Store contract for users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Loads a user, or `None` if absent
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Loads every user
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;

    /// Persists a new user
    async fn add(&self, user: &User) -> Result<(), StoreError>;

    /// Persists changes to an existing user
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    /// Deletes a user
    async fn delete(&self, user: &User) -> Result<(), StoreError>;

    /// Flushes any batched writes
    async fn commit(&self) -> Result<(), StoreError>;
}
