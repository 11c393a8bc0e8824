/// Demo seed data
///
/// Populates empty stores with a handful of users, collections, and
/// tasks for local development. Seeding is skipped when users already
/// exist, so it is safe to run on every startup.

use crate::models::collection::TaskCollection;
use crate::models::task_item::TaskItem;
use crate::models::user::User;
use crate::store::{CollectionStore, StoreError, TaskItemStore, UserStore};
use uuid::{uuid, Uuid};

const ALICE: Uuid = uuid!("11111111-1111-1111-1111-111111111111");
const BOB: Uuid = uuid!("22222222-2222-2222-2222-222222222222");
const CHARLIE: Uuid = uuid!("33333333-3333-3333-3333-333333333333");
const DIANA: Uuid = uuid!("44444444-4444-4444-4444-444444444444");
const EVE: Uuid = uuid!("55555555-5555-5555-5555-555555555555");

/// Seeds demo users, collections, shares, and tasks if the stores are empty
pub async fn seed_demo_data(
    users: &dyn UserStore,
    collections: &dyn CollectionStore,
    items: &dyn TaskItemStore,
) -> Result<(), StoreError> {
    if !users.get_all().await?.is_empty() {
        tracing::debug!("stores already populated, skipping demo seed");
        return Ok(());
    }

    for (id, name) in [
        (ALICE, "Alice"),
        (BOB, "Bob"),
        (CHARLIE, "Charlie"),
        (DIANA, "Diana"),
        (EVE, "Eve"),
    ] {
        users.add(&User { id, name: name.to_string() }).await?;
    }
    users.commit().await?;

    let alice_tasks = TaskCollection::new("Alice Tasks", ALICE);
    let bob_tasks = TaskCollection::new("Bob Tasks", BOB);
    let charlie_tasks = TaskCollection::new("Charlie Tasks", CHARLIE);
    let mut shared_project = TaskCollection::new("Shared Project", ALICE);
    shared_project.add_share(BOB);
    shared_project.add_share(DIANA);

    for collection in [&alice_tasks, &bob_tasks, &charlie_tasks, &shared_project] {
        collections.add(collection).await?;
    }
    collections.update(&shared_project).await?;
    collections.commit().await?;

    let tasks = [
        TaskItem::new("Buy milk", alice_tasks.id),
        TaskItem::new("Finish report", alice_tasks.id),
        TaskItem::new("Call Bob", bob_tasks.id),
        TaskItem::new("Email client", bob_tasks.id),
        TaskItem::new("Prepare slides", charlie_tasks.id),
        TaskItem::new("Setup meeting", shared_project.id),
        TaskItem::new("Deploy project", shared_project.id),
    ];
    for task in &tasks {
        items.add(task).await?;
    }
    items.commit().await?;

    tracing::info!("seeded demo data (5 users, 4 collections, 7 tasks)");
    Ok(())
}
