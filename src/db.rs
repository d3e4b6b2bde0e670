//! SQLite connection setup and embedded schema migrations.

use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    migrate::{MigrateError, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

/// Schema for `users`, `recipes` and `ingredients`, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool against `database_url`, creating the database file (and its
/// parent directory) if it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!("Connecting using raw URL => {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parsing database URL `{}`", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let db_path = options.get_filename();
    tracing::debug!("Interpreted SQLite path => {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {:?}", parent))?;
            tracing::info!("Created missing directory {:?}", parent);
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {}", database_url))?;

    Ok(pool)
}

/// Apply every pending migration. Already-applied migrations are skipped, so
/// this is safe on every start.
pub async fn run_migrations(db: &SqlitePool) -> Result<(), MigrateError> {
    tracing::info!("Running {} migration(s)...", MIGRATOR.iter().count());
    MIGRATOR.run(db).await
}

