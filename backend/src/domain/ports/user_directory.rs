//! Driving port for the user use-cases.
//!
//! Inbound adapters (HTTP handlers) call this port and never touch the store
//! directly. Failures are already expressed as domain [`Error`]s.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, NewUser, User, UserId};

/// Look up, create and delete users by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user holding `email`, or a not-found error.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Create a user and return its new id, or a conflict error when the
    /// email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<UserId, Error>;

    /// Delete the user holding `email`, or return a not-found error.
    async fn delete_by_email(&self, email: &EmailAddress) -> Result<(), Error>;
}
