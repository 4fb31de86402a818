//! Service entry-point: loads settings, prepares storage, and runs the HTTP
//! server.

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_registry::inbound::http::health::HealthState;
use user_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
use user_registry::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use user_registry::server::{ServerConfig, create_server};
use user_registry::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(|e| io::Error::other(format!("invalid session configuration: {e}")))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_accounts(settings.accounts());

    if let Some(database_url) = settings.database_url() {
        let max_size = settings.db_max_connections().map_err(io::Error::other)?;
        let pool = prepare_database(database_url, max_size).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting user registry");
    create_server(health_state, config)?.await
}

/// Apply migrations and open the connection pool.
async fn prepare_database(database_url: &str, max_size: u32) -> io::Result<DbPool> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| io::Error::other(format!("migrations failed: {e}")))?;

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(|e| io::Error::other(format!("database pool: {e}")))
}
