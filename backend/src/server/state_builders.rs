//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::domain::UserService;
use crate::domain::ports::UserRepository;
use crate::inbound::http::state::HttpState;
use crate::outbound::accounts::ConfiguredLoginService;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Pick the user store: PostgreSQL when a pool is configured, memory
/// otherwise.
fn user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("storing users in PostgreSQL");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            info!("no database configured; storing users in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Build the HTTP state for `config`.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let login = ConfiguredLoginService::new(config.accounts.iter().cloned());
    if login.is_empty() {
        info!("no login accounts configured; every login will be rejected");
    }
    http_state_for(Arc::new(login), user_repository(config))
}

/// Wire a [`UserService`] over `repository` into fresh HTTP state.
pub fn http_state_for(
    login: Arc<dyn crate::domain::ports::LoginService>,
    repository: Arc<dyn UserRepository>,
) -> web::Data<HttpState> {
    let users = Arc::new(UserService::new(repository));
    web::Data::new(HttpState::new(login, users.clone(), users))
}
