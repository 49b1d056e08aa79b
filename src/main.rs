use std::sync::Arc;

use soccer_player_api::config::Config;
use soccer_player_api::db::{self, SqlitePlayerStore};
use soccer_player_api::routes::{self, SharedStore};
use soccer_player_api::seed;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting player api server...");

    let config = Config::from_env().expect("Invalid configuration");

    // Create database connection pool
    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");

    db::init_schema(&pool)
        .await
        .expect("Failed to create players table");

    tracing::info!("Database connection established.");

    let store: SharedStore = Arc::new(SqlitePlayerStore::new(pool));

    // Seed before the listener exists so no request sees a half-filled table.
    seed::seed_if_empty(store.as_ref())
        .await
        .expect("Failed to seed sample players");

    let app = routes::router(store, config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
