//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use api_catalogue::outbound::persistence::DbPool;
use api_catalogue::outbound::storage::CapStdSpecificationStore;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<CapStdSpecificationStore>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration around an opened document store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: CapStdSpecificationStore) -> Self {
        Self {
            bind_addr,
            store: Arc::new(store),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the catalogue repository.
    ///
    /// Without a pool the server keeps the catalogue in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
