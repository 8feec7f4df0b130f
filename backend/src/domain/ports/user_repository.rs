//! Driven port for user storage.
//!
//! The store owns id allocation and enforces email uniqueness itself, so two
//! concurrent inserts for the same email can never both succeed.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already held by another user.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Keyed access to stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user holding `email`, if any.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user and return the id the store issued for it.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken; the uniqueness check and the insert are a single atomic step.
    async fn insert(&self, new_user: &NewUser) -> Result<UserId, UserPersistenceError>;

    /// Remove the user holding `email`. Returns `true` when a user was removed.
    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Number of stored users.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}
