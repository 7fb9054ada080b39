//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CATALOGUE_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SPECIFICATIONS_FOLDER: &str = "./specifications";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Configuration values for the catalogue service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct CatalogueSettings {
    /// Directory receiving uploaded specification documents.
    pub specifications_folder: Option<PathBuf>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one the catalogue is kept in
    /// memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl CatalogueSettings {
    /// Return the configured specifications folder, falling back to the
    /// default.
    pub fn specifications_folder(&self) -> PathBuf {
        self.specifications_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SPECIFICATIONS_FOLDER))
    }

    /// Parse the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Return the database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
