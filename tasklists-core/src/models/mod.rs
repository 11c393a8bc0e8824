/// Domain models for TaskLists
///
/// This module contains the entities of the system and their
/// invariant-preserving mutators. Entities are plain data holders;
/// persistence goes through the store contracts in [`crate::store`].
///
/// # Models
///
/// - `user`: User identity (referenced by id everywhere else)
/// - `collection`: Task collections with their share list
/// - `task_item`: Individual tasks inside a collection
///
/// # Example
///
/// ```
/// use tasklists_core::models::collection::TaskCollection;
/// use uuid::Uuid;
///
/// let owner = Uuid::new_v4();
/// let mut collection = TaskCollection::new("Groceries", owner);
///
/// let friend = Uuid::new_v4();
/// collection.add_share(friend);
///
/// assert!(collection.can_access(owner));
/// assert!(collection.can_access(friend));
/// assert!(collection.is_owner(owner));
/// assert!(!collection.is_owner(friend));
/// ```

pub mod collection;
pub mod task_item;
pub mod user;
