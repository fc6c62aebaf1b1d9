pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

pub use migrations::{create_database_pool, setup_database};
pub use seed::seed_demo_data;

/// A single-connection in-memory database with the schema applied; every
/// extra connection would open a separate, empty database.
#[cfg(test)]
pub(crate) async fn memory_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    setup_database(&pool).await.unwrap();
    pool
}
