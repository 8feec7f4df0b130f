//! Persistence adapters implementing the `UserRepository` port.
//!
//! Two interchangeable stores are provided:
//!
//! - [`InMemoryUserRepository`]: a process-local map, used when no database
//!   is configured and throughout the tests.
//! - [`DieselUserRepository`]: PostgreSQL via Diesel with `diesel-async` and
//!   `bb8` pooling. Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use user_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
