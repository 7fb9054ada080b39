//! Catalogue service implementing the [`ApiCatalogue`] driving port.
//!
//! The service places uploaded documents through a [`SpecificationStore`]
//! and records metadata through an [`ApiEntryRepository`]. Documents that are
//! no longer referenced (overwritten, deleted, or orphaned by a failed write)
//! are removed on a best-effort basis: a failed removal is logged and never
//! fails the request.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ApiCatalogue, ApiEntryRepository, ApiEntryRepositoryError, SpecificationStore,
    SpecificationStoreError,
};
use crate::domain::{
    ApiEntry, ApiEntryId, Error, NewApiEntry, NewSpecificationFile, SpecificationDownload,
    SpecificationUpload,
};

/// Largest page the catalogue will serve; larger requests are capped.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Catalogue service composed from a repository and a document store.
#[derive(Clone)]
pub struct ApiCatalogueService<R, S> {
    repository: Arc<R>,
    store: Arc<S>,
}

impl<R, S> ApiCatalogueService<R, S> {
    /// Create a new service with the given adapters.
    pub fn new(repository: Arc<R>, store: Arc<S>) -> Self {
        Self { repository, store }
    }
}

fn map_repository_error(error: ApiEntryRepositoryError) -> Error {
    match error {
        ApiEntryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("api entry repository unavailable: {message}"))
        }
        ApiEntryRepositoryError::Query { message } => {
            Error::internal(format!("api entry repository error: {message}"))
        }
    }
}

fn map_store_error(error: SpecificationStoreError) -> Error {
    match error {
        SpecificationStoreError::Missing { path } => {
            Error::internal(format!("specification file missing: {path}"))
        }
        SpecificationStoreError::Io { message } => {
            Error::internal(format!("specification store error: {message}"))
        }
    }
}

fn entry_not_found(id: ApiEntryId) -> Error {
    Error::not_found(format!("api entry {id} not found"))
}

impl<R, S> ApiCatalogueService<R, S>
where
    R: ApiEntryRepository,
    S: SpecificationStore,
{
    async fn discard(&self, path: &Path) {
        match self.store.remove(path).await {
            Ok(()) => debug!(path = %path.display(), "removed specification file"),
            Err(error) => warn!(
                %error,
                path = %path.display(),
                "failed to remove specification file"
            ),
        }
    }

    async fn require_entry(&self, id: ApiEntryId) -> Result<ApiEntry, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| entry_not_found(id))
    }
}

#[async_trait]
impl<R, S> ApiCatalogue for ApiCatalogueService<R, S>
where
    R: ApiEntryRepository,
    S: SpecificationStore,
{
    async fn create_or_replace(
        &self,
        entry: NewApiEntry,
        upload: SpecificationUpload,
    ) -> Result<ApiEntry, Error> {
        let content_type = upload.content_type().to_owned();
        let path = self
            .store
            .place(upload.into_bytes())
            .await
            .map_err(map_store_error)?;
        let file = NewSpecificationFile::new(content_type, &path);

        let outcome = match self.repository.upsert(&entry, &file).await {
            Ok(outcome) => outcome,
            Err(error) => {
                self.discard(&path).await;
                return Err(map_repository_error(error));
            }
        };

        if let Some(replaced) = &outcome.replaced_file {
            self.discard(&replaced.file_path).await;
        }
        info!(
            id = %outcome.entry.id,
            name = outcome.entry.name.as_str(),
            version = outcome.entry.version.as_str(),
            replaced = outcome.replaced_file.is_some(),
            "stored api entry"
        );
        Ok(outcome.entry)
    }

    async fn get(&self, id: ApiEntryId) -> Result<ApiEntry, Error> {
        self.require_entry(id).await
    }

    async fn get_page(&self, page: u32, page_size: u32) -> Result<Page<ApiEntry>, Error> {
        let request = PageRequest::bounded(page, page_size, MAX_PAGE_SIZE)
            .map_err(|error| Error::invalid_request(error.to_string()))?;
        self.repository
            .find_page(request)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: ApiEntryId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| entry_not_found(id))?;
        self.discard(&removed.specification_file.file_path).await;
        info!(id = %id, "deleted api entry");
        Ok(())
    }

    async fn open_specification(&self, id: ApiEntryId) -> Result<SpecificationDownload, Error> {
        let entry = self.require_entry(id).await?;
        let file = entry.specification_file;
        let bytes = match self.store.read(&file.file_path).await {
            Ok(bytes) => bytes,
            Err(SpecificationStoreError::Missing { path }) => {
                warn!(
                    id = %id,
                    path = path.as_str(),
                    "specification file referenced by entry is missing"
                );
                return Err(Error::not_found(format!(
                    "specification file for api entry {id} not found"
                )));
            }
            Err(error) => return Err(map_store_error(error)),
        };
        Ok(SpecificationDownload {
            content_type: file.content_type,
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
