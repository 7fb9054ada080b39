//! File-system adapters for uploaded specification documents.

mod cap_std_specification_store;

pub use cap_std_specification_store::{CapStdSpecificationStore, SPECIFICATION_FILE_PREFIX};
