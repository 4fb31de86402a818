//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

/// Domain use-case port for creating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user unless one with the same names already exists.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Delete the user with `id`, or return a not-found error.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
