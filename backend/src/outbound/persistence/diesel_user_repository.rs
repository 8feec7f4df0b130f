//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` constraint rather
//! than by a read-then-write in the adapter; a unique violation on insert is
//! reported as [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserName};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

fn map_insert_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email(email.as_ref())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(row.id)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored user: {err}")))?;
    Ok(User::new(
        id,
        UserName::new(row.name),
        EmailAddress::new(row.email),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, new_user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            name: new_user.name().as_ref(),
            email: new_user.email().as_ref(),
        };
        let id: i64 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, new_user.email()))?;

        UserId::new(id)
            .map_err(|err| UserPersistenceError::query(format!("invalid issued id: {err}")))
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(users::table.filter(users::email.eq(email.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(total).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage. Queries run against embedded PostgreSQL in
    //! `tests/diesel_user_repository.rs`.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct StubInfo;

    impl DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            "stub"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("users_email_key")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo))
    }

    #[rstest]
    fn unique_violation_on_insert_is_duplicate_email() {
        let email = EmailAddress::new("i.i.ivanov@mail.com");
        let err = map_insert_error(database_error(DatabaseErrorKind::UniqueViolation), &email);
        assert_eq!(err, UserPersistenceError::duplicate_email("i.i.ivanov@mail.com"));
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn other_failures_are_query_errors() {
        let err = map_diesel_error(DieselError::NotFound);
        assert_eq!(err, UserPersistenceError::query("record not found"));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn rows_with_invalid_ids_are_rejected() {
        let row = UserRow {
            id: 0,
            name: "Ghost".to_owned(),
            email: "ghost@mail.com".to_owned(),
        };
        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
