//! Login adapter backed by accounts supplied through configuration.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, Principal, Role};

/// A single configured login.
#[derive(Debug, Clone)]
pub struct ConfiguredAccount {
    username: String,
    password: Zeroizing<String>,
    role: Role,
}

impl ConfiguredAccount {
    /// Build an account granting `role` to `username`.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
            role,
        }
    }

    /// Build an account only when a password is configured.
    ///
    /// Accounts without a password are disabled rather than open.
    pub fn enabled(username: impl Into<String>, password: Option<&str>, role: Role) -> Option<Self> {
        password.map(|password| Self::new(username, password, role))
    }

    fn accepts(&self, credentials: &LoginCredentials) -> bool {
        self.username == credentials.username() && self.password.as_str() == credentials.password()
    }
}

/// `LoginService` that checks credentials against a fixed account list.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLoginService {
    accounts: Vec<ConfiguredAccount>,
}

impl ConfiguredLoginService {
    /// Create a service from the given accounts.
    pub fn new(accounts: impl IntoIterator<Item = ConfiguredAccount>) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }

    /// Number of enabled accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account can log in.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        self.accounts
            .iter()
            .find(|account| account.accepts(credentials))
            .map(|account| Principal::new(account.username.as_str(), account.role))
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
