//! Store selection and HTTP state assembly.
//!
//! With a database URL the service runs migrations and talks to PostgreSQL;
//! without one it keeps users in process memory.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use user_api::domain::ports::{UserDirectory, UserRepository};
use user_api::domain::{UserDirectoryService, default_seed_users, seed_users};
use user_api::inbound::http::state::HttpState;
use user_api::outbound::persistence::{
    DbPool, DieselUserRepository, InMemoryUserRepository, PoolConfig, run_pending_migrations,
};
use user_api::settings::ServiceSettings;

use super::ServerConfig;

/// Open the store selected by `settings`.
///
/// # Errors
/// Fails when migrations cannot be applied or the pool cannot be built.
pub(crate) async fn build_repository(
    settings: &ServiceSettings,
) -> Result<Arc<dyn UserRepository>> {
    let Some(url) = settings.database_url() else {
        info!(store = "in-memory", "user store selected");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    let applied = run_pending_migrations(url)
        .await
        .wrap_err("failed to migrate user database")?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("failed to build database pool")?;
    info!(
        store = "postgres",
        max_connections = settings.db_max_connections(),
        "user store selected"
    );
    Ok(Arc::new(DieselUserRepository::new(pool)))
}

/// Seed the default users when enabled, then wrap the store in the domain
/// service.
///
/// # Errors
/// Propagates store failures raised while seeding.
pub(crate) async fn build_user_directory(
    settings: &ServiceSettings,
    repository: Arc<dyn UserRepository>,
) -> Result<Arc<dyn UserDirectory>> {
    if settings.seed_users() {
        let outcome = seed_users(repository.as_ref(), &default_seed_users())
            .await
            .wrap_err("failed to seed default users")?;
        info!(
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            total = outcome.total,
            "default users seeded"
        );
    }
    Ok(Arc::new(UserDirectoryService::new(repository)))
}

/// Build the shared HTTP state for handlers.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::clone(&config.directory)))
}
