/// Application state and router builder
///
/// The state holds the two services over whichever store backend was
/// selected at startup (Postgres or in-memory), plus the configuration.
///
/// # Example
///
/// ```no_run
/// use tasklists_api::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::in_memory(config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tasklists_core::service::{collections::CollectionService, task_items::TaskItemService};
use tasklists_core::store::{
    memory::MemoryStore,
    postgres::{PgCollectionStore, PgTaskItemStore, PgUserStore},
    CollectionStore, TaskItemStore, UserStore,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; all
/// fields are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    /// Collection access-control and mutation service
    pub collections: Arc<CollectionService>,

    /// Task item service
    pub tasks: Arc<TaskItemService>,

    /// User store (seed data and demo listings)
    pub users: Arc<dyn UserStore>,

    /// Database pool when running on Postgres; `None` on the in-memory store
    pub db: Option<PgPool>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state backed by Postgres stores
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        let collection_store: Arc<dyn CollectionStore> =
            Arc::new(PgCollectionStore::new(pool.clone()));
        let item_store: Arc<dyn TaskItemStore> = Arc::new(PgTaskItemStore::new(pool.clone()));
        let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));

        Self {
            collections: Arc::new(CollectionService::new(collection_store.clone())),
            tasks: Arc::new(TaskItemService::new(item_store, collection_store)),
            users: user_store,
            db: Some(pool),
            config: Arc::new(config),
        }
    }

    /// Creates state backed by the in-memory store
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let collection_store: Arc<dyn CollectionStore> = store.clone();
        let item_store: Arc<dyn TaskItemStore> = store.clone();
        let user_store: Arc<dyn UserStore> = store;

        Self {
            collections: Arc::new(CollectionService::new(collection_store.clone())),
            tasks: Arc::new(TaskItemService::new(item_store, collection_store)),
            users: user_store,
            db: None,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                    # Health check (public)
/// └── /v1/
///     ├── /collections
///     │   ├── POST   /                           # Create collection
///     │   ├── GET    /?user_id&page&page_size    # List for user
///     │   ├── GET    /:id?user_id                # Get by id
///     │   ├── PUT    /:id?user_id                # Rename
///     │   ├── DELETE /:id?user_id                # Delete (owner only)
///     │   ├── POST   /:id/share?user_id          # Share with a user
///     │   └── DELETE /:id/share/:share_user_id?user_id  # Unshare
///     └── /tasks
///         ├── POST   /?user_id                   # Create task
///         ├── GET    /:id?user_id                # Get by id
///         ├── PUT    /:id?user_id                # Update title/completion
///         ├── DELETE /:id?user_id                # Delete
///         └── GET    /collection/:collection_id?user_id  # List by collection
/// ```
///
/// # Middleware Stack
///
/// 1. Request logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let collection_routes = Router::new()
        .route("/", post(routes::collections::create))
        .route("/", get(routes::collections::list))
        .route("/:id", get(routes::collections::get_by_id))
        .route("/:id", put(routes::collections::rename))
        .route("/:id", delete(routes::collections::delete))
        .route("/:id/share", post(routes::collections::share))
        .route(
            "/:id/share/:share_user_id",
            delete(routes::collections::unshare),
        );

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create))
        .route("/:id", get(routes::tasks::get_by_id))
        .route("/:id", put(routes::tasks::update))
        .route("/:id", delete(routes::tasks::delete))
        .route(
            "/collection/:collection_id",
            get(routes::tasks::list_by_collection),
        );

    let v1_routes = Router::new()
        .nest("/collections", collection_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
