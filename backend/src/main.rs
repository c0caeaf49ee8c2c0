//! Backend entry-point: loads settings, prepares the store, and serves the
//! REST API, the GraphQL admin API, and OpenAPI docs.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use teachteam::inbound::http::health::HealthState;
use teachteam::inbound::http::session_config::{BuildMode, session_settings_from_env};
use teachteam::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let admin = settings.admin_bootstrap().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr).with_admin(admin);
    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations {
            let applied = run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database migrations complete");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config).await?.await
}
