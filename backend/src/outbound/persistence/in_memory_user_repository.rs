//! Process-local `UserRepository` backed by a hash map.
//!
//! Users are keyed by email. The map and the id counter sit behind one mutex,
//! so the uniqueness check and the insert happen atomically and ids are handed
//! out strictly increasing, starting at 1, and never reused.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId};

#[derive(Debug)]
struct Inner {
    users: HashMap<EmailAddress, User>,
    next_id: i64,
}

/// In-memory implementation of the `UserRepository` port.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, UserPersistenceError> {
        self.inner
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(email).cloned())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut inner = self.lock()?;
        if inner.users.contains_key(new_user.email()) {
            return Err(UserPersistenceError::duplicate_email(
                new_user.email().as_ref(),
            ));
        }

        let id = UserId::new(inner.next_id).map_err(|err| {
            UserPersistenceError::query(format!("id sequence corrupted: {err}"))
        })?;
        inner.next_id = inner
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("id sequence exhausted"))?;
        inner
            .users
            .insert(new_user.email().clone(), new_user.clone().into_user(id));
        Ok(id)
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.remove(email).is_some())
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let len = self.lock()?.users.len();
        u64::try_from(len).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}
