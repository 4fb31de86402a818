//! User domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports over a
//! [`UserRepository`]. Domain conditions become typed [`Error`] values here;
//! inbound adapters decide how each [`crate::domain::ErrorCode`] is
//! rendered.
//!
//! Creation checks for an existing (last name, first name) pair and then
//! saves as two separate repository calls. Concurrent creates can both pass
//! the check; the store's unique index is the only hard guard, and a
//! violation surfaces as an internal error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserExample, UserId};

/// User service implementing the driving ports.
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserService<R> {
    /// Create a new service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// Message used for every missing-user failure.
pub fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("User with id = {id} not found"))
}

/// Message used when the (last name, first name) pair is already stored.
pub fn user_exists(user: &NewUser) -> Error {
    Error::already_exists(format!(
        "User {} {} exists.",
        user.last_name(),
        user.first_name()
    ))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    warn!(%error, "user repository failure");
    match error {
        UserPersistenceError::Connection { message }
        | UserPersistenceError::Query { message }
        | UserPersistenceError::UniqueViolation { message } => Error::internal(message),
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .find_all_sorted_by_last_name()
            .await
            .map_err(map_persistence_error)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let example = UserExample::from(&user);
        let exists = self
            .repository
            .exists_by_example(&example)
            .await
            .map_err(map_persistence_error)?;
        if exists {
            info!(
                last_name = user.last_name(),
                first_name = user.first_name(),
                "rejected duplicate user"
            );
            return Err(user_exists(&user));
        }

        let saved = self
            .repository
            .save(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(id = %saved.id(), "created user");
        Ok(saved)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if !exists {
            return Err(user_not_found(id));
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        info!(%id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
