/// Task item service
///
/// Task operations thread the actor id and re-use the parent
/// collection's [`TaskCollection::can_access`] predicate, so a task can
/// only be created, read, changed, or deleted by a user with access to
/// its collection. Item creation also verifies the target collection
/// exists, keeping the foreign key honest at the service layer.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tasklists_core::service::{collections::CollectionService, task_items::TaskItemService};
/// use tasklists_core::store::memory::MemoryStore;
/// use uuid::Uuid;
///
/// # async fn example() {
/// let store = Arc::new(MemoryStore::new());
/// let collections = CollectionService::new(store.clone());
/// let tasks = TaskItemService::new(store.clone(), store);
///
/// let owner = Uuid::new_v4();
/// let collection = collections.create("My Tasks", owner).await.unwrap();
/// let task = tasks.create("Buy milk", collection.id, owner).await.unwrap();
/// assert!(!task.is_completed);
/// # }
/// ```

use crate::models::collection::TaskCollection;
use crate::models::task_item::TaskItem;
use crate::result::{messages, ServiceError, ServiceResult};
use crate::service::StoreResultExt;
use crate::store::{CollectionStore, TaskItemStore};
use std::sync::Arc;
use uuid::Uuid;

/// Service for task item operations
pub struct TaskItemService {
    items: Arc<dyn TaskItemStore>,
    collections: Arc<dyn CollectionStore>,
}

impl TaskItemService {
    /// Creates a service over the given stores
    pub fn new(items: Arc<dyn TaskItemStore>, collections: Arc<dyn CollectionStore>) -> Self {
        Self { items, collections }
    }

    /// Handle to the backing item store, used by startup seeding
    pub fn store(&self) -> &dyn TaskItemStore {
        self.items.as_ref()
    }

    /// Creates a task inside an existing collection the actor can access
    pub async fn create(
        &self,
        title: &str,
        collection_id: Uuid,
        actor_id: Uuid,
    ) -> ServiceResult<TaskItem> {
        self.authorize(collection_id, actor_id, messages::FAILED_CREATE_TASK)
            .await?;

        let task = TaskItem::new(title, collection_id);
        self.items
            .add(&task)
            .await
            .or_fail(messages::FAILED_CREATE_TASK)?;
        self.items
            .commit()
            .await
            .or_fail(messages::FAILED_CREATE_TASK)?;

        Ok(task)
    }

    /// Applies the combined title and completion update to a task
    ///
    /// A blank title leaves the stored title unchanged; the completion
    /// flag is always applied.
    pub async fn update(
        &self,
        task_id: Uuid,
        actor_id: Uuid,
        title: &str,
        is_completed: bool,
    ) -> ServiceResult<TaskItem> {
        let mut task = self.load(task_id, messages::FAILED_UPDATE_TASK).await?;
        self.authorize(task.task_collection_id, actor_id, messages::FAILED_UPDATE_TASK)
            .await?;

        task.update_title_and_status(title, is_completed);
        self.items
            .update(&task)
            .await
            .or_fail(messages::FAILED_UPDATE_TASK)?;
        self.items
            .commit()
            .await
            .or_fail(messages::FAILED_UPDATE_TASK)?;

        Ok(task)
    }

    /// Deletes a task
    pub async fn delete(&self, task_id: Uuid, actor_id: Uuid) -> ServiceResult<bool> {
        let task = self.load(task_id, messages::FAILED_DELETE_TASK).await?;
        self.authorize(task.task_collection_id, actor_id, messages::FAILED_DELETE_TASK)
            .await?;

        self.items
            .delete(&task)
            .await
            .or_fail(messages::FAILED_DELETE_TASK)?;
        self.items
            .commit()
            .await
            .or_fail(messages::FAILED_DELETE_TASK)?;

        Ok(true)
    }

    /// Returns a task if the actor can access its collection
    pub async fn get_by_id(&self, task_id: Uuid, actor_id: Uuid) -> ServiceResult<TaskItem> {
        let task = self.load(task_id, messages::FAILED_GET_TASK).await?;
        self.authorize(task.task_collection_id, actor_id, messages::FAILED_GET_TASK)
            .await?;

        Ok(task)
    }

    /// Lists all tasks of a collection the actor can access, oldest first
    pub async fn list_by_collection(
        &self,
        collection_id: Uuid,
        actor_id: Uuid,
    ) -> ServiceResult<Vec<TaskItem>> {
        self.authorize(collection_id, actor_id, messages::FAILED_GET_TASKS)
            .await?;

        self.items
            .get_by_collection(collection_id)
            .await
            .or_fail(messages::FAILED_GET_TASKS)
    }

    async fn load(&self, task_id: Uuid, failure: &'static str) -> Result<TaskItem, ServiceError> {
        self.items
            .get_by_id(task_id)
            .await
            .or_fail(failure)?
            .ok_or_else(|| ServiceError::not_found(messages::TASK_NOT_FOUND))
    }

    async fn authorize(
        &self,
        collection_id: Uuid,
        actor_id: Uuid,
        failure: &'static str,
    ) -> Result<TaskCollection, ServiceError> {
        let collection = self
            .collections
            .get_by_id(collection_id)
            .await
            .or_fail(failure)?
            .ok_or_else(|| ServiceError::not_found(messages::COLLECTION_NOT_FOUND))?;

        if !collection.can_access(actor_id) {
            return Err(ServiceError::forbidden(messages::ACCESS_DENIED));
        }

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ErrorKind;
    use crate::service::collections::CollectionService;
    use crate::store::memory::MemoryStore;

    struct Fixture {
        collections: CollectionService,
        tasks: TaskItemService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            collections: CollectionService::new(store.clone()),
            tasks: TaskItemService::new(store.clone(), store),
        }
    }

    #[tokio::test]
    async fn test_create_task_in_owned_collection() {
        let fx = fixture();
        let owner = Uuid::new_v4();
        let collection = fx.collections.create("My Tasks", owner).await.unwrap();

        let task = fx
            .tasks
            .create("Buy milk", collection.id, owner)
            .await
            .unwrap();

        assert_eq!(task.title, "Buy milk");
        assert!(!task.is_completed);
        assert_eq!(task.task_collection_id, collection.id);
    }

    #[tokio::test]
    async fn test_create_task_in_missing_collection_is_not_found() {
        let fx = fixture();
        let err = fx
            .tasks
            .create("Orphan", Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.errors, vec![messages::COLLECTION_NOT_FOUND.to_string()]);
    }

    #[tokio::test]
    async fn test_create_task_by_stranger_is_forbidden() {
        let fx = fixture();
        let collection = fx
            .collections
            .create("My Tasks", Uuid::new_v4())
            .await
            .unwrap();

        let err = fx
            .tasks
            .create("Sneaky", collection.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_shared_user_can_manage_tasks() {
        let fx = fixture();
        let owner = Uuid::new_v4();
        let friend = Uuid::new_v4();
        let collection = fx.collections.create("Shared", owner).await.unwrap();
        fx.collections
            .share(collection.id, owner, friend)
            .await
            .unwrap();

        let task = fx
            .tasks
            .create("Setup meeting", collection.id, friend)
            .await
            .unwrap();

        let updated = fx
            .tasks
            .update(task.id, friend, "Setup kickoff meeting", true)
            .await
            .unwrap();
        assert_eq!(updated.title, "Setup kickoff meeting");
        assert!(updated.is_completed);

        assert!(fx.tasks.delete(task.id, friend).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_with_blank_title_keeps_title() {
        let fx = fixture();
        let owner = Uuid::new_v4();
        let collection = fx.collections.create("My Tasks", owner).await.unwrap();
        let task = fx
            .tasks
            .create("Buy milk", collection.id, owner)
            .await
            .unwrap();

        let updated = fx.tasks.update(task.id, owner, "", true).await.unwrap();
        assert_eq!(updated.title, "Buy milk");
        assert!(updated.is_completed);
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let fx = fixture();
        let err = fx
            .tasks
            .update(Uuid::new_v4(), Uuid::new_v4(), "Title", false)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.errors, vec![messages::TASK_NOT_FOUND.to_string()]);
    }

    #[tokio::test]
    async fn test_delete_by_stranger_is_forbidden() {
        let fx = fixture();
        let owner = Uuid::new_v4();
        let collection = fx.collections.create("My Tasks", owner).await.unwrap();
        let task = fx
            .tasks
            .create("Buy milk", collection.id, owner)
            .await
            .unwrap();

        let err = fx
            .tasks
            .delete(task.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        // Still there
        assert!(fx.tasks.get_by_id(task.id, owner).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_by_collection_requires_access() {
        let fx = fixture();
        let owner = Uuid::new_v4();
        let collection = fx.collections.create("My Tasks", owner).await.unwrap();
        fx.tasks
            .create("Buy milk", collection.id, owner)
            .await
            .unwrap();
        fx.tasks
            .create("Finish report", collection.id, owner)
            .await
            .unwrap();

        let listed = fx
            .tasks
            .list_by_collection(collection.id, owner)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);

        let err = fx
            .tasks
            .list_by_collection(collection.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_collection_delete_cascades_to_tasks() {
        let fx = fixture();
        let owner = Uuid::new_v4();
        let collection = fx.collections.create("My Tasks", owner).await.unwrap();
        let task = fx
            .tasks
            .create("Buy milk", collection.id, owner)
            .await
            .unwrap();

        fx.collections.delete(collection.id, owner).await.unwrap();

        let err = fx.tasks.get_by_id(task.id, owner).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
