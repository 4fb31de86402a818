//! In-process `UserRepository` used when no database is configured.
//!
//! Mirrors the PostgreSQL adapter: ids come from a monotonically increasing
//! sequence starting at 1, listing orders by last name then id, and the
//! (last name, first name) pair is unique at insert time.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserExample, UserId};

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    users: BTreeMap<UserId, User>,
}

impl Store {
    fn insert(&mut self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let duplicate = self.users.values().any(|stored| {
            stored.last_name() == user.last_name() && stored.first_name() == user.first_name()
        });
        if duplicate {
            return Err(UserPersistenceError::unique_violation(
                "users_last_name_first_name_key",
            ));
        }

        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let stored = user.clone().with_id(UserId::new(self.next_id));
        self.users.insert(stored.id(), stored.clone());
        Ok(stored)
    }
}

/// Thread-safe in-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all_sorted_by_last_name(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.lock()?;
        // BTreeMap iteration is id order, so a stable sort keeps id order on ties.
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by(|a, b| a.last_name().cmp(b.last_name()));
        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn exists_by_example(
        &self,
        example: &UserExample,
    ) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.values().any(|user| example.matches(user)))
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.contains_key(&id))
    }

    async fn save(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.lock()?.insert(user)
    }

    async fn save_all(&self, users: &[NewUser]) -> Result<Vec<User>, UserPersistenceError> {
        let mut store = self.lock()?;
        users.iter().map(|user| store.insert(user)).collect()
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.lock()?.users.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), UserPersistenceError> {
        self.lock()?.users.clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let len = self.lock()?.users.len();
        u64::try_from(len).map_err(|_| UserPersistenceError::query("user count overflow"))
    }
}
