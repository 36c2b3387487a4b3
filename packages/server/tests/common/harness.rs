//! Test harnesses for integration testing.
//!
//! `MemoryHarness` runs every activity against the in-memory store and needs
//! nothing external. `TestHarness` runs against a shared Postgres container;
//! the container and migrations are initialized once, then reused.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use directory_core::common::{Actor, PageSettings};
use directory_core::domains::auth::JwtService;
use directory_core::domains::history::SearchHistoryLog;
use directory_core::kernel::{BaseEntityStore, PostgresEntityStore, ServerDeps};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

pub const TEST_JWT_SECRET: &str = "test_secret";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn admin() -> Actor {
    Actor::new("curator", true)
}

pub fn viewer() -> Actor {
    Actor::new("viewer", false)
}

// ============================================================================
// In-memory harness
// ============================================================================

pub struct MemoryHarness {
    pub deps: ServerDeps,
}

impl MemoryHarness {
    pub fn new() -> Self {
        init_tracing();
        let jwt_service = Arc::new(JwtService::new(
            TEST_JWT_SECRET,
            TEST_JWT_ISSUER.to_string(),
        ));
        Self {
            deps: ServerDeps::in_memory(jwt_service),
        }
    }

    pub fn store(&self) -> &dyn BaseEntityStore {
        self.deps.store.as_ref()
    }
}

impl Default for MemoryHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Postgres harness
// ============================================================================

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Postgres-backed harness.
///
/// Tests share one database, so assertions should be scoped to the ids a
/// test created itself.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let store = ctx.store();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let deps = ServerDeps::new(
            Arc::new(PostgresEntityStore::new(db_pool.clone())),
            PageSettings::default(),
            Arc::new(SearchHistoryLog::default()),
            Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
            )),
        );

        Ok(Self { db_pool, deps })
    }

    pub fn store(&self) -> &dyn BaseEntityStore {
        self.deps.store.as_ref()
    }
}
