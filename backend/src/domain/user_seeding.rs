//! Startup seeding of well-known users.
//!
//! Seeding is idempotent: users whose email is already stored are skipped, so
//! a persistent store can be seeded on every start.

use tracing::info;

use crate::domain::NewUser;
use crate::domain::ports::{UserPersistenceError, UserRepository};

/// Users present in a freshly started service.
#[must_use]
pub fn default_seed_users() -> Vec<NewUser> {
    vec![
        NewUser::from_parts("Ivan Ivanov", "i.i.ivanov@mail.com"),
        NewUser::from_parts("Petr Petrov", "p.p.petrov@mail.com"),
    ]
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Users inserted by this run.
    pub inserted: usize,
    /// Users skipped because their email was already stored.
    pub skipped: usize,
    /// Users held by the store once seeding finished.
    pub total: u64,
}

/// Insert each of `users` unless its email is already stored, then report
/// the store's size.
///
/// # Errors
/// Propagates connection and query failures from the store.
pub async fn seed_users<R>(
    repository: &R,
    users: &[NewUser],
) -> Result<SeedOutcome, UserPersistenceError>
where
    R: UserRepository + ?Sized,
{
    let mut outcome = SeedOutcome::default();
    for user in users {
        if repository.find_by_email(user.email()).await?.is_some() {
            outcome.skipped += 1;
            continue;
        }
        match repository.insert(user).await {
            Ok(id) => {
                info!(user_id = %id, email = %user.email(), "seeded user");
                outcome.inserted += 1;
            }
            // Lost a race with another instance seeding the same store.
            Err(UserPersistenceError::DuplicateEmail { .. }) => outcome.skipped += 1,
            Err(err) => return Err(err),
        }
    }
    outcome.total = repository.count().await?;
    Ok(outcome)
}
