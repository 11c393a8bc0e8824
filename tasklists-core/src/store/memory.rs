/// In-memory store implementation
///
/// A single [`MemoryStore`] implements all three store contracts over
/// shared maps behind one `RwLock`, which lets collection deletion
/// cascade to task items the same way the Postgres foreign keys do.
/// Writes apply eagerly; `commit` is a no-op.
///
/// Used by the test suites and by the API server when no database is
/// configured.
///
/// # Example
///
/// ```
/// use tasklists_core::models::collection::TaskCollection;
/// use tasklists_core::store::{memory::MemoryStore, CollectionStore};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), tasklists_core::store::StoreError> {
/// let store = MemoryStore::new();
/// let collection = TaskCollection::new("My Tasks", Uuid::new_v4());
/// store.add(&collection).await?;
///
/// let loaded = store.get_by_id(collection.id).await?;
/// assert!(loaded.is_some());
/// # Ok(())
/// # }
/// ```

use crate::models::collection::{TaskCollection, MAX_SHARES};
use crate::models::task_item::TaskItem;
use crate::models::user::User;
use crate::store::{CollectionStore, StoreError, TaskItemStore, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    collections: HashMap<Uuid, TaskCollection>,
    items: HashMap<Uuid, TaskItem>,
}

/// In-memory implementation of every store contract
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskCollection>, StoreError> {
        Ok(self.inner.read().await.collections.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<TaskCollection>, StoreError> {
        Ok(self.inner.read().await.collections.values().cloned().collect())
    }

    async fn add(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .collections
            .insert(collection.id, collection.clone());
        Ok(())
    }

    async fn update(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        // Backstop for the share-cap invariant: the write lock serializes
        // concurrent updaters, so the validated state is the stored state.
        if collection.shares.len() > MAX_SHARES {
            return Err(StoreError::ShareCapExceeded(collection.id));
        }
        self.inner
            .write()
            .await
            .collections
            .insert(collection.id, collection.clone());
        Ok(())
    }

    async fn delete(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.collections.remove(&collection.id);
        // Cascade: items belonging to the collection go with it
        inner
            .items
            .retain(|_, item| item.task_collection_id != collection.id);
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl TaskItemStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskItem>, StoreError> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn get_by_collection(&self, collection_id: Uuid) -> Result<Vec<TaskItem>, StoreError> {
        let mut items: Vec<TaskItem> = self
            .inner
            .read()
            .await
            .items
            .values()
            .filter(|item| item.task_collection_id == collection_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn add(&self, item: &TaskItem) -> Result<(), StoreError> {
        self.inner.write().await.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &TaskItem) -> Result<(), StoreError> {
        self.inner.write().await.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete(&self, item: &TaskItem) -> Result<(), StoreError> {
        self.inner.write().await.items.remove(&item.id);
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn add(&self, user: &User) -> Result<(), StoreError> {
        self.inner.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        self.inner.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        self.inner.write().await.users.remove(&user.id);
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
