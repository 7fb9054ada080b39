//! Backend entry-point: loads configuration, composes the catalogue adapters
//! and serves the REST endpoints, the upload pages and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use api_catalogue::inbound::http::health::HealthState;
use api_catalogue::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use api_catalogue::outbound::storage::CapStdSpecificationStore;
use api_catalogue::settings::CatalogueSettings;
use server::{ServerConfig, create_server};

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

    let settings = CatalogueSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let folder = settings.specifications_folder();
    let store = CapStdSpecificationStore::open(&folder).map_err(|e| {
        std::io::Error::other(format!(
            "failed to open specifications folder {}: {e}",
            folder.display()
        ))
    })?;
    info!(folder = %store.root().display(), "specification store ready");

    let mut config = ServerConfig::new(bind_addr, store);
    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting api catalogue");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
