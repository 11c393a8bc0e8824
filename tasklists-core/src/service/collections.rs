/// Collection service: access control, sharing, and collection mutations
///
/// Authorization rules:
///
/// - Read, rename, share, and unshare require [`TaskCollection::can_access`]:
///   the actor is the owner or appears in the share list.
/// - Delete requires the stricter [`TaskCollection::is_owner`].
///
/// Share-list invariants (`no duplicates`, `len <= 3`) are enforced here
/// and backstopped by the store (see [`crate::store`]).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tasklists_core::service::collections::CollectionService;
/// use tasklists_core::store::memory::MemoryStore;
/// use uuid::Uuid;
///
/// # async fn example() {
/// let service = CollectionService::new(Arc::new(MemoryStore::new()));
///
/// let owner = Uuid::new_v4();
/// let collection = service.create("My Tasks", owner).await.unwrap();
/// let friend = Uuid::new_v4();
/// let shared = service.share(collection.id, owner, friend).await.unwrap();
/// assert!(shared.is_shared_with(friend));
/// # }
/// ```

use crate::models::collection::{TaskCollection, MAX_SHARES};
use crate::result::{messages, ServiceError, ServiceResult};
use crate::service::StoreResultExt;
use crate::store::CollectionStore;
use std::sync::Arc;
use uuid::Uuid;

/// Page used when the caller passes `page <= 0`
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller passes `page_size <= 0`
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Service for collection and sharing operations
pub struct CollectionService {
    store: Arc<dyn CollectionStore>,
}

impl CollectionService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Handle to the backing store, used by startup seeding
    pub fn store(&self) -> &dyn CollectionStore {
        self.store.as_ref()
    }

    /// Creates a new collection owned by `owner_id`
    ///
    /// The name's length contract (1-255) is enforced upstream by the
    /// input validation layer; creation itself needs no authorization.
    pub async fn create(&self, name: &str, owner_id: Uuid) -> ServiceResult<TaskCollection> {
        let collection = TaskCollection::new(name, owner_id);
        self.store
            .add(&collection)
            .await
            .or_fail(messages::FAILED_CREATE_COLLECTION)?;
        self.store
            .commit()
            .await
            .or_fail(messages::FAILED_CREATE_COLLECTION)?;

        Ok(collection)
    }

    /// Renames a collection
    ///
    /// Requires access. Blank names are silently ignored: the stored name
    /// is left unchanged and the operation still succeeds.
    pub async fn rename(
        &self,
        collection_id: Uuid,
        actor_id: Uuid,
        new_name: &str,
    ) -> ServiceResult<TaskCollection> {
        let mut collection = self
            .load(collection_id, messages::FAILED_UPDATE_COLLECTION)
            .await?;

        if !collection.can_access(actor_id) {
            return Err(ServiceError::forbidden(messages::ACCESS_DENIED));
        }

        collection.rename(new_name);
        self.persist(&collection, messages::FAILED_UPDATE_COLLECTION)
            .await?;

        Ok(collection)
    }

    /// Deletes a collection, cascading to its shares and task items
    ///
    /// Owner only: a shared user is still forbidden here.
    pub async fn delete(&self, collection_id: Uuid, actor_id: Uuid) -> ServiceResult<bool> {
        let collection = self
            .load(collection_id, messages::FAILED_DELETE_COLLECTION)
            .await?;

        if !collection.is_owner(actor_id) {
            return Err(ServiceError::forbidden(messages::ONLY_OWNER_CAN_DELETE));
        }

        self.store
            .delete(&collection)
            .await
            .or_fail(messages::FAILED_DELETE_COLLECTION)?;
        self.store
            .commit()
            .await
            .or_fail(messages::FAILED_DELETE_COLLECTION)?;

        Ok(true)
    }

    /// Returns a collection if the actor has access to it
    pub async fn get_by_id(
        &self,
        collection_id: Uuid,
        actor_id: Uuid,
    ) -> ServiceResult<TaskCollection> {
        let collection = self
            .load(collection_id, messages::FAILED_GET_COLLECTION)
            .await?;

        if !collection.can_access(actor_id) {
            return Err(ServiceError::forbidden(messages::ACCESS_DENIED));
        }

        Ok(collection)
    }

    /// Lists the collections the actor owns or is shared on, paginated
    ///
    /// Ordered newest first with a stable id tiebreak. `page <= 0` falls
    /// back to page 1 and `page_size <= 0` to 20; a page past the end of
    /// the results yields an empty list, never an error.
    pub async fn list_for_user(
        &self,
        actor_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<TaskCollection>> {
        let page = if page <= 0 { DEFAULT_PAGE } else { page };
        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        let mut collections: Vec<TaskCollection> = self
            .store
            .get_all()
            .await
            .or_fail(messages::FAILED_GET_COLLECTIONS)?
            .into_iter()
            .filter(|c| c.can_access(actor_id))
            .collect();

        collections.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        // Saturate so an absurdly large page skips everything instead of
        // overflowing; the result is the documented empty page.
        let offset = (page - 1).saturating_mul(page_size);
        Ok(collections
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(page_size as usize)
            .collect())
    }

    /// Shares a collection with `target_user_id`
    ///
    /// Requires access. Fails with `QuotaExceeded` once the share list
    /// holds [`MAX_SHARES`] users; below the cap, sharing an already
    /// shared user is an idempotent no-op.
    pub async fn share(
        &self,
        collection_id: Uuid,
        actor_id: Uuid,
        target_user_id: Uuid,
    ) -> ServiceResult<TaskCollection> {
        let mut collection = self
            .load(collection_id, messages::FAILED_SHARE_COLLECTION)
            .await?;

        if !collection.can_access(actor_id) {
            return Err(ServiceError::forbidden(messages::ACCESS_DENIED));
        }

        if collection.shares.len() >= MAX_SHARES {
            return Err(ServiceError::quota_exceeded(messages::MAX_THREE_USERS));
        }

        collection.add_share(target_user_id);
        self.persist(&collection, messages::FAILED_SHARE_COLLECTION)
            .await?;

        Ok(collection)
    }

    /// Removes `target_user_id` from a collection's share list
    ///
    /// Requires access. Unsharing a user who was never shared succeeds
    /// and leaves the list unchanged.
    pub async fn unshare(
        &self,
        collection_id: Uuid,
        actor_id: Uuid,
        target_user_id: Uuid,
    ) -> ServiceResult<TaskCollection> {
        let mut collection = self
            .load(collection_id, messages::FAILED_UNSHARE_COLLECTION)
            .await?;

        if !collection.can_access(actor_id) {
            return Err(ServiceError::forbidden(messages::ACCESS_DENIED));
        }

        collection.remove_share(target_user_id);
        self.persist(&collection, messages::FAILED_UNSHARE_COLLECTION)
            .await?;

        Ok(collection)
    }

    async fn load(
        &self,
        collection_id: Uuid,
        failure: &'static str,
    ) -> Result<TaskCollection, ServiceError> {
        self.store
            .get_by_id(collection_id)
            .await
            .or_fail(failure)?
            .ok_or_else(|| ServiceError::not_found(messages::COLLECTION_NOT_FOUND))
    }

    async fn persist(
        &self,
        collection: &TaskCollection,
        failure: &'static str,
    ) -> Result<(), ServiceError> {
        self.store.update(collection).await.or_fail(failure)?;
        self.store.commit().await.or_fail(failure)?;
        Ok(())
    }
}
