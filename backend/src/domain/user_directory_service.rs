//! User directory domain service.
//!
//! Implements the [`UserDirectory`] driving port over any [`UserRepository`],
//! translating store outcomes into the domain errors clients see.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, Error, NewUser, User, UserId};

/// Message returned when no user holds the requested email.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
/// Message returned when creating a user with an email that is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

/// User directory service implementing the driving port.
pub struct UserDirectoryService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserDirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserDirectoryService<R> {
    /// Create a service over the given store.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    debug!(%error, "user repository call failed");
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserId, Error> {
        let id = self
            .repository
            .insert(&new_user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, email = %new_user.email(), "user created");
        Ok(id)
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<(), Error> {
        let removed = self
            .repository
            .delete_by_email(email)
            .await
            .map_err(map_persistence_error)?;
        if !removed {
            return Err(Error::not_found(USER_NOT_FOUND_MESSAGE));
        }
        info!(%email, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour against a mocked store.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ivan() -> User {
        NewUser::from_parts("Ivan Ivanov", "i.i.ivanov@mail.com")
            .into_user(UserId::new(1).expect("valid id"))
    }

    fn service(repository: MockUserRepository) -> UserDirectoryService<MockUserRepository> {
        UserDirectoryService::new(Arc::new(repository))
    }

    #[rstest]
    #[tokio::test]
    async fn find_returns_stored_user(ivan: User) {
        let mut repository = MockUserRepository::new();
        let stored = ivan.clone();
        repository
            .expect_find_by_email()
            .with(eq(EmailAddress::new("i.i.ivanov@mail.com")))
            .times(1)
            .return_once(move |_| Ok(Some(stored)));

        let found = service(repository)
            .find_by_email(&EmailAddress::new("i.i.ivanov@mail.com"))
            .await
            .expect("user found");
        assert_eq!(found, ivan);
    }

    #[rstest]
    #[tokio::test]
    async fn find_reports_missing_user_as_not_found() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .return_once(|_| Ok(None));

        let err = service(repository)
            .find_by_email(&EmailAddress::new("nonexistent@mail.com"))
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_store_issued_id() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_insert()
            .withf(|user| user.email().as_ref() == "new.user@mail.com")
            .times(1)
            .return_once(|_| Ok(UserId::new(3).expect("valid id")));

        let id = service(repository)
            .create(NewUser::from_parts("New User", "new.user@mail.com"))
            .await
            .expect("user created");
        assert_eq!(id.get(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn create_maps_duplicate_email_to_conflict() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate_email("i.i.ivanov@mail.com")));

        let err = service(repository)
            .create(NewUser::from_parts("Existing User", "i.i.ivanov@mail.com"))
            .await
            .expect_err("duplicate email");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_succeeds_when_store_removed_a_user() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_delete_by_email()
            .with(eq(EmailAddress::new("to.delete@mail.com")))
            .return_once(|_| Ok(true));

        service(repository)
            .delete_by_email(&EmailAddress::new("to.delete@mail.com"))
            .await
            .expect("user deleted");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_missing_user_as_not_found() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_delete_by_email()
            .return_once(|_| Ok(false));

        let err = service(repository)
            .delete_by_email(&EmailAddress::new("nonexistent@mail.com"))
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax error"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_failures_map_to_domain_codes(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .return_once(move |_| Err(failure));

        let err = service(repository)
            .find_by_email(&EmailAddress::new("i.i.ivanov@mail.com"))
            .await
            .expect_err("store failure");
        assert_eq!(err.code(), expected);
    }
}
