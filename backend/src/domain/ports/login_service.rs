//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! account store. HTTP handler tests substitute a test double instead of
//! wiring configuration.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, Role};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// Deterministic authenticator for tests and local development.
///
/// `admin` / `password` authenticates as [`Role::Admin`] and `user` /
/// `password` as [`Role::User`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let role = match (credentials.username(), credentials.password()) {
            ("admin", "password") => Role::Admin,
            ("user", "password") => Role::User,
            _ => return Err(Error::unauthorized("invalid credentials")),
        };
        Ok(Principal::new(credentials.username(), role))
    }
}
