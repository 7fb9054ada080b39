//! Builders for the HTTP state and the catalogue service behind it.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use api_catalogue::domain::ApiCatalogueService;
use api_catalogue::domain::ports::ApiCatalogue;
use api_catalogue::inbound::http::state::HttpState;
use api_catalogue::outbound::memory::InMemoryApiEntryRepository;
use api_catalogue::outbound::persistence::DieselApiEntryRepository;

use super::ServerConfig;

/// Compose the catalogue service from the configured adapters.
///
/// Uses the Diesel repository when a pool is available, otherwise an
/// in-memory repository whose contents are lost on restart.
fn build_catalogue(config: &ServerConfig) -> Arc<dyn ApiCatalogue> {
    let store = config.store.clone();
    match &config.db_pool {
        Some(pool) => Arc::new(ApiCatalogueService::new(
            Arc::new(DieselApiEntryRepository::new(pool.clone())),
            store,
        )),
        None => {
            warn!("no database configured; catalogue entries are held in memory");
            Arc::new(ApiCatalogueService::new(
                Arc::new(InMemoryApiEntryRepository::new()),
                store,
            ))
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_catalogue(config)))
}
