//! # TaskLists API Server
//!
//! HTTP server for shareable task collections: collection CRUD,
//! per-collection sharing with a small cap, and task management under
//! the collection's access rules.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Collection endpoints (create, list, get, rename, delete)
//! - Sharing endpoints (share, unshare) with owner/shared-user rules
//! - Task endpoints scoped to their parent collection
//!
//! Storage is Postgres when `DATABASE_URL` is set, otherwise an
//! in-memory store suitable for demos and local development.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasklists-api
//! ```

use tasklists_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasklists_core::{db, store::seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklists_api=debug,tasklists_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskLists API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let state = match config.database.clone() {
        Some(db_config) => {
            let pool = db::create_pool(db_config).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Connected to Postgres, migrations applied");
            AppState::postgres(pool, config)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, falling back to the in-memory store");
            AppState::in_memory(config)
        }
    };

    if state.config.seed_demo_data {
        seed::seed_demo_data(
            state.users.as_ref(),
            state.collections.store(),
            state.tasks.store(),
        )
        .await?;
        tracing::info!("Demo seed pass complete");
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}
