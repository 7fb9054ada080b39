//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_catalogue;
mod api_entry_repository;
mod specification_store;

#[cfg(test)]
pub use api_catalogue::MockApiCatalogue;
pub use api_catalogue::ApiCatalogue;
#[cfg(test)]
pub use api_entry_repository::MockApiEntryRepository;
pub use api_entry_repository::{ApiEntryRepository, ApiEntryRepositoryError, UpsertOutcome};
#[cfg(test)]
pub use specification_store::MockSpecificationStore;
pub use specification_store::{SpecificationStore, SpecificationStoreError};
