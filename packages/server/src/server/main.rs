// Main entry point for the directory API server

use std::sync::Arc;

use anyhow::{Context, Result};
use directory_core::common::PageSettings;
use directory_core::domains::auth::JwtService;
use directory_core::domains::history::SearchHistoryLog;
use directory_core::kernel::{
    BaseEntityStore, MemoryEntityStore, PostgresEntityStore, ServerDeps,
};
use directory_core::server::{build_app, AppState};
use directory_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,directory_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting exhibition directory API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let (store, db_pool) = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");

            let store: Arc<dyn BaseEntityStore> = Arc::new(PostgresEntityStore::new(pool.clone()));
            (store, Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            let store: Arc<dyn BaseEntityStore> = Arc::new(MemoryEntityStore::new());
            (store, None)
        }
    };

    let deps = ServerDeps::new(
        store,
        PageSettings {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        },
        Arc::new(SearchHistoryLog::new(config.search_history_capacity)),
        Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())),
    );

    // Build application
    let app = build_app(AppState::new(deps, db_pool), &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
