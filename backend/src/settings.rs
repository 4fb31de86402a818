//! Application settings loaded via OrthoConfig.
//!
//! Values come from `USER_REGISTRY_*` environment variables, CLI flags, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::Role;
use crate::outbound::accounts::ConfiguredAccount;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_USER_USERNAME: &str = "user";

/// Invalid settings detected after loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Process-level configuration for the user registry service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one, users live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Login name of the administrative account.
    pub admin_username: Option<String>,
    /// Password of the administrative account; unset disables it.
    pub admin_password: Option<String>,
    /// Login name of the read-only account.
    pub user_username: Option<String>,
    /// Password of the read-only account; unset disables it.
    pub user_password: Option<String>,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Pool size; zero is rejected.
    pub const fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections {
            0 => Err(SettingsError::ZeroConnections),
            size => Ok(size),
        }
    }

    /// Login accounts that have a password configured.
    pub fn accounts(&self) -> Vec<ConfiguredAccount> {
        [
            ConfiguredAccount::enabled(
                self.admin_username
                    .as_deref()
                    .unwrap_or(DEFAULT_ADMIN_USERNAME),
                self.admin_password.as_deref(),
                Role::Admin,
            ),
            ConfiguredAccount::enabled(
                self.user_username.as_deref().unwrap_or(DEFAULT_USER_USERNAME),
                self.user_password.as_deref(),
                Role::User,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
