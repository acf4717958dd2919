use sqlx::SqlitePool;

use crate::{connect_pool, run_migrations, PoolConfig};

/// A migrated in-memory database. One connection, so every query sees the
/// same database.
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = connect_pool(
        "sqlite::memory:",
        PoolConfig {
            max_connections: 1,
            ..PoolConfig::default()
        },
    )
    .await
    .expect("in-memory sqlite pool");
    run_migrations(&pool).await.expect("migrations apply");
    pool
}
