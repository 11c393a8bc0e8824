/// TaskItem model
///
/// A single task inside a collection. The `task_collection_id` foreign
/// key is immutable; items are deleted together with their collection.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_items (
///     id UUID PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     task_collection_id UUID NOT NULL REFERENCES task_collections(id) ON DELETE CASCADE
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task inside a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskItem {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task title (1-255 characters)
    pub title: String,

    /// Whether the task has been completed
    pub is_completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Collection this task belongs to; immutable after creation
    pub task_collection_id: Uuid,
}

impl TaskItem {
    /// Creates a new, not-yet-completed task with a fresh id
    pub fn new(title: impl Into<String>, task_collection_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
            created_at: Utc::now(),
            task_collection_id,
        }
    }

    /// Applies the combined title and completion update
    ///
    /// A blank title leaves the current title unchanged; the completion
    /// flag is always applied.
    pub fn update_title_and_status(&mut self, title: &str, is_completed: bool) {
        if !title.trim().is_empty() {
            self.title = title.to_string();
        }
        self.is_completed = is_completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_not_completed() {
        let collection_id = Uuid::new_v4();
        let task = TaskItem::new("Buy milk", collection_id);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.is_completed);
        assert_eq!(task.task_collection_id, collection_id);
    }

    #[test]
    fn test_update_applies_title_and_status() {
        let mut task = TaskItem::new("Buy milk", Uuid::new_v4());
        task.update_title_and_status("Buy oat milk", true);
        assert_eq!(task.title, "Buy oat milk");
        assert!(task.is_completed);
    }

    #[test]
    fn test_update_with_blank_title_keeps_title() {
        let mut task = TaskItem::new("Buy milk", Uuid::new_v4());
        task.update_title_and_status("", true);
        assert_eq!(task.title, "Buy milk");
        assert!(task.is_completed);

        task.update_title_and_status("   ", false);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.is_completed);
    }
}
