//! Driven port for the durable storage of uploaded specification documents.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by specification stores.
    pub enum SpecificationStoreError {
        /// The document referenced by a file record no longer exists.
        Missing { path: String } =>
            "specification file missing: {path}",
        /// Reading, writing or deleting a document failed.
        Io { message: String } =>
            "specification store I/O failed: {message}",
    }
}

/// Port for placing, reading and removing specification documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpecificationStore: Send + Sync {
    /// Write `bytes` verbatim under a freshly generated name and return the
    /// absolute path of the new document.
    async fn place(&self, bytes: Vec<u8>) -> Result<PathBuf, SpecificationStoreError>;

    /// Read a previously placed document.
    async fn read(&self, path: &Path) -> Result<Vec<u8>, SpecificationStoreError>;

    /// Remove a previously placed document.
    async fn remove(&self, path: &Path) -> Result<(), SpecificationStoreError>;
}
