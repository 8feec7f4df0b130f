//! Embedded schema migrations.
//!
//! Migrations run over a short-lived synchronous connection on a blocking
//! thread; the async pool is only used for request traffic.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply all pending migrations and return how many ran.
///
/// # Errors
/// Returns [`MigrationError`] when connecting or applying fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })?;
        Ok(applied.len())
    })
    .await
    .map_err(|err| MigrationError::Task {
        message: err.to_string(),
    })?
}
