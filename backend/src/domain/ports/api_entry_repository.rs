//! Driven port for persisting catalogue entries and their file records.
//!
//! Adapters own the natural-key semantics: an upsert for an existing
//! `(name, version)` pair must update that entry in place, inside a single
//! transaction, so concurrent submissions never create duplicates.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{ApiEntry, ApiEntryId, NewApiEntry, NewSpecificationFile, SpecificationFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue entry repositories.
    pub enum ApiEntryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "api entry repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "api entry repository query failed: {message}",
    }
}

/// Result of a natural-key upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Entry as stored after the write.
    pub entry: ApiEntry,
    /// File record detached from the entry when an existing pair was
    /// overwritten. Its record is already deleted; the document on disk is
    /// left for the caller to remove.
    pub replaced_file: Option<SpecificationFile>,
}

/// Port for reading and writing catalogue entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiEntryRepository: Send + Sync {
    /// Fetch one entry by id.
    async fn find_by_id(&self, id: ApiEntryId) -> Result<Option<ApiEntry>, ApiEntryRepositoryError>;

    /// Fetch one page of entries ordered by name, then version, ascending.
    async fn find_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<ApiEntry>, ApiEntryRepositoryError>;

    /// Insert a file record and insert or update the entry keyed by
    /// `(name, version)`, atomically.
    async fn upsert(
        &self,
        entry: &NewApiEntry,
        file: &NewSpecificationFile,
    ) -> Result<UpsertOutcome, ApiEntryRepositoryError>;

    /// Delete an entry and its file record, returning what was removed.
    async fn delete(&self, id: ApiEntryId) -> Result<Option<ApiEntry>, ApiEntryRepositoryError>;
}
