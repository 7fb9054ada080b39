//! Driving port exposing catalogue use-cases to inbound adapters.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    ApiEntry, ApiEntryId, Error, NewApiEntry, SpecificationDownload, SpecificationUpload,
};

/// Catalogue use-cases shared by the REST and view adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiCatalogue: Send + Sync {
    /// Store the upload and create the entry, or overwrite the entry that
    /// already carries the same `(name, version)` pair, keeping its id.
    async fn create_or_replace(
        &self,
        entry: NewApiEntry,
        upload: SpecificationUpload,
    ) -> Result<ApiEntry, Error>;

    /// Fetch one entry; [`crate::domain::ErrorCode::NotFound`] when absent.
    async fn get(&self, id: ApiEntryId) -> Result<ApiEntry, Error>;

    /// Fetch a zero-based page ordered by name then version. Page sizes above
    /// the catalogue maximum are capped; a zero page size is rejected.
    async fn get_page(&self, page: u32, page_size: u32) -> Result<Page<ApiEntry>, Error>;

    /// Delete one entry together with its specification document.
    async fn delete(&self, id: ApiEntryId) -> Result<(), Error>;

    /// Load the specification document owned by an entry.
    async fn open_specification(&self, id: ApiEntryId) -> Result<SpecificationDownload, Error>;
}
