//! Persistence for the alumni service.
//!
//! The storage contract lives in [`stores`]; [`backends`] holds one
//! implementation per store engine. Relational queries are grouped per table
//! in [`repositories`].

pub mod backends;
pub mod error;
pub mod models;
pub mod repositories;
pub mod stores;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use stores::Stores;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Connect to MongoDB and select the application database.
///
/// The driver connects lazily; call [`stores::StoreHealth::ping`] to verify
/// the server is reachable.
pub async fn connect_mongo(
    uri: &str,
    database: &str,
) -> Result<mongodb::Database, mongodb::error::Error> {
    let mut options = mongodb::options::ClientOptions::parse(uri).await?;
    options.app_name = Some("alumni-api".to_string());
    options.max_pool_size = Some(20);
    let client = mongodb::Client::with_options(options)?;
    Ok(client.database(database))
}
