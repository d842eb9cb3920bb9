//! Account ledger HTTP service.
//!
//! Exposes account creation, lookup by id and paginated listing over a JSON
//! API. Persistence sits behind the [`store::Store`] trait so the same router
//! runs against PostgreSQL or an in-memory store.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    config::Config,
    store::{MemoryStore, PgStore, SharedStore},
};

/// Build the store selected by the configuration.
///
/// With `DATABASE_URL` set this connects to PostgreSQL and runs pending
/// migrations; otherwise accounts are kept in memory.
pub async fn build_store(config: &Config) -> anyhow::Result<SharedStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, accounts will be kept in memory");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = db::create_pool(database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    Ok(Arc::new(PgStore::new(pool)))
}

/// Build the HTTP router around an already constructed store.
pub fn app_router(store: SharedStore, config: &Config) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/v1/accounts",
            post(handlers::accounts::create_account).get(handlers::accounts::list_accounts),
        )
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account),
        )
        .with_state(store);

    // Dropping the timed-out request future also drops any store calls it is awaiting
    if let Some(timeout) = config.request_timeout() {
        app = app.layer(TimeoutLayer::new(timeout));
    }

    app.layer(TraceLayer::new_for_http())
}
