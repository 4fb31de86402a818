//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns. Production backs this port with
//! [`crate::domain::UserService`]; tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return all users ordered by last name ascending.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with `id`, or a not-found error.
    async fn find_user(&self, id: UserId) -> Result<User, Error>;
}
