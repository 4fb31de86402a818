//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserExample, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
        /// The store's unique (last name, first name) index rejected a write.
        UniqueViolation => "user repository unique index violated: {message}",
    }
}

/// Typed access to the user store.
///
/// Adapters own id generation and the unique index on
/// (last name, first name). Callers check existence before deleting;
/// [`UserRepository::delete_by_id`] is a silent no-op for missing ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user ordered by last name ascending.
    ///
    /// Ties keep primary-key order.
    async fn find_all_sorted_by_last_name(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Return `true` when any stored user matches the populated example fields.
    async fn exists_by_example(&self, example: &UserExample)
    -> Result<bool, UserPersistenceError>;

    /// Return `true` when a user with `id` is stored.
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Persist a new user and return it with its generated id.
    async fn save(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Persist several users, returning them in input order.
    async fn save_all(&self, users: &[NewUser]) -> Result<Vec<User>, UserPersistenceError>;

    /// Delete the user with `id`, if present.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError>;

    /// Remove every stored user.
    async fn delete_all(&self) -> Result<(), UserPersistenceError>;

    /// Number of stored users.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}
