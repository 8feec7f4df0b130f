//! bb8 pool of `diesel-async` PostgreSQL connections backing the user store.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool failures, mapped to [`UserPersistenceError::Connection`] by the
/// repository.
///
/// [`UserPersistenceError::Connection`]: crate::domain::ports::UserPersistenceError::Connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available before the checkout timeout.
    #[error("user store connection unavailable: {message}")]
    Checkout { message: String },

    /// The pool could not be created from the configured URL.
    #[error("user store pool could not be built: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Where the user store lives and how many connections it may hold.
///
/// ```
/// use std::time::Duration;
/// use user_api::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/users")
///     .with_max_size(4)
///     .with_checkout_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Ten connections and a 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the number of pooled connections; `USER_API_DB_MAX_CONNECTIONS`.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Bound how long a request waits for a free connection.
    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Shared handle to the user store's connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily on checkout.
    ///
    /// # Errors
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// Returns [`PoolError::Checkout`] when the database is unreachable or the
    /// pool stays exhausted past the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
