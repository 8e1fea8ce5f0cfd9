//! Embedded schema migrations, applied once at process start.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Compiled-in migrations from the crate's `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying embedded migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a synchronous connection for the migration run.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),

    /// A migration failed to apply.
    #[error("failed to run migrations: {0}")]
    Apply(String),
}

/// Apply all pending migrations over a dedicated synchronous connection.
///
/// Runs on a blocking thread; call once during bootstrap before serving
/// traffic.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply(err.to_string()))?;
        for migration in &applied {
            info!(migration = %migration, "applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Apply(format!("migration task panicked: {err}")))?
}
