/// Postgres store implementations
///
/// sqlx-backed implementations of the store contracts. Cascade deletion
/// of shares and task items is handled by the foreign keys declared in
/// the migrations; see the schema blocks on the model types.
///
/// # Share-cap guarantee
///
/// [`PgCollectionStore::update`] reconciles the share list inside a
/// transaction. New shares are inserted with a count-guarded statement
/// (`ON CONFLICT DO NOTHING` over the composite primary key, insert only
/// while the collection holds fewer than the cap), so two racing share
/// calls can never push a collection past three shares. When the guard
/// rejects an intended share, the update fails with
/// [`StoreError::ShareCapExceeded`] and the caller reports the quota
/// failure.
///
/// # Example
///
/// ```no_run
/// use tasklists_core::db::{create_pool, DatabaseConfig};
/// use tasklists_core::models::collection::TaskCollection;
/// use tasklists_core::store::{postgres::PgCollectionStore, CollectionStore};
/// use uuid::Uuid;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = create_pool(DatabaseConfig {
///     url: "postgresql://localhost/tasklists".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgCollectionStore::new(pool);
/// let collection = TaskCollection::new("My Tasks", Uuid::new_v4());
/// store.add(&collection).await?;
/// # Ok(())
/// # }
/// ```

use crate::models::collection::{Share, TaskCollection, MAX_SHARES};
use crate::models::task_item::TaskItem;
use crate::models::user::User;
use crate::store::{CollectionStore, StoreError, TaskItemStore, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Row shape of the `task_collections` table (shares attached separately)
#[derive(Debug, sqlx::FromRow)]
struct CollectionRow {
    id: Uuid,
    name: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl CollectionRow {
    fn into_collection(self, shares: Vec<Share>) -> TaskCollection {
        TaskCollection {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            created_at: self.created_at,
            shares,
        }
    }
}

/// Postgres-backed collection store
#[derive(Debug, Clone)]
pub struct PgCollectionStore {
    pool: PgPool,
}

impl PgCollectionStore {
    /// Creates a store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for PgCollectionStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskCollection>, StoreError> {
        let row = sqlx::query_as::<_, CollectionRow>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM task_collections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let shares = sqlx::query_as::<_, Share>(
            r#"
            SELECT task_collection_id, user_id, created_at
            FROM shares
            WHERE task_collection_id = $1
            ORDER BY created_at ASC, user_id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_collection(shares)))
    }

    async fn get_all(&self) -> Result<Vec<TaskCollection>, StoreError> {
        let rows = sqlx::query_as::<_, CollectionRow>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM task_collections
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let shares = sqlx::query_as::<_, Share>(
            r#"
            SELECT task_collection_id, user_id, created_at
            FROM shares
            ORDER BY created_at ASC, user_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_collection: HashMap<Uuid, Vec<Share>> = HashMap::new();
        for share in shares {
            by_collection
                .entry(share.task_collection_id)
                .or_default()
                .push(share);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let shares = by_collection.remove(&row.id).unwrap_or_default();
                row.into_collection(shares)
            })
            .collect())
    }

    async fn add(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO task_collections (id, name, owner_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(collection.id)
        .bind(&collection.name)
        .bind(collection.owner_id)
        .bind(collection.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE task_collections
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(collection.id)
        .bind(&collection.name)
        .execute(&mut *tx)
        .await?;

        let desired: Vec<Uuid> = collection.shares.iter().map(|s| s.user_id).collect();

        // Drop shares that were removed from the list
        sqlx::query(
            r#"
            DELETE FROM shares
            WHERE task_collection_id = $1 AND user_id <> ALL($2)
            "#,
        )
        .bind(collection.id)
        .bind(&desired)
        .execute(&mut *tx)
        .await?;

        // Count-guarded insert: appends only while under the cap, and the
        // composite primary key rejects duplicates from racing writers.
        for share in &collection.shares {
            sqlx::query(
                r#"
                INSERT INTO shares (task_collection_id, user_id, created_at)
                SELECT $1, $2, $3
                WHERE (SELECT COUNT(*) FROM shares WHERE task_collection_id = $1) < $4
                ON CONFLICT (task_collection_id, user_id) DO NOTHING
                "#,
            )
            .bind(collection.id)
            .bind(share.user_id)
            .bind(share.created_at)
            .bind(MAX_SHARES as i64)
            .execute(&mut *tx)
            .await?;
        }

        // Verify every intended share landed; a missing one means the
        // guard rejected it because a racing writer filled the last slot.
        let persisted: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM shares
            WHERE task_collection_id = $1 AND user_id = ANY($2)
            "#,
        )
        .bind(collection.id)
        .bind(&desired)
        .fetch_one(&mut *tx)
        .await?;

        if persisted < desired.len() as i64 {
            tx.rollback().await?;
            return Err(StoreError::ShareCapExceeded(collection.id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, collection: &TaskCollection) -> Result<(), StoreError> {
        // Shares and task items go with the collection via ON DELETE CASCADE
        sqlx::query("DELETE FROM task_collections WHERE id = $1")
            .bind(collection.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Postgres-backed task item store
#[derive(Debug, Clone)]
pub struct PgTaskItemStore {
    pool: PgPool,
}

impl PgTaskItemStore {
    /// Creates a store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskItemStore for PgTaskItemStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskItem>, StoreError> {
        let item = sqlx::query_as::<_, TaskItem>(
            r#"
            SELECT id, title, is_completed, created_at, task_collection_id
            FROM task_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn get_by_collection(&self, collection_id: Uuid) -> Result<Vec<TaskItem>, StoreError> {
        let items = sqlx::query_as::<_, TaskItem>(
            r#"
            SELECT id, title, is_completed, created_at, task_collection_id
            FROM task_items
            WHERE task_collection_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn add(&self, item: &TaskItem) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO task_items (id, title, is_completed, created_at, task_collection_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(item.is_completed)
        .bind(item.created_at)
        .bind(item.task_collection_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, item: &TaskItem) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE task_items
            SET title = $2, is_completed = $3
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(item.is_completed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, item: &TaskItem) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM task_items WHERE id = $1")
            .bind(item.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Postgres-backed user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn add(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users (id, name) VALUES ($1, $2)")
            .bind(user.id)
            .bind(&user.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET name = $2 WHERE id = $1")
            .bind(user.id)
            .bind(&user.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
