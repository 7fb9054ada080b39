//! Domain primitives, services and ports.
//!
//! Purpose: define the catalogue entities, the validation rules applied to
//! submissions and the service orchestrating storage, independent of HTTP,
//! Diesel or the file system.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - ApiEntry, SpecificationFile and friends: stored catalogue records.
//! - ApiDraft / ApiError: submission validation.
//! - ViewApi: display rows for the web UI.
//! - ApiCatalogueService: implementation of the catalogue driving port.

pub mod api_entry;
pub mod catalogue_service;
pub mod error;
pub mod ports;
pub mod presentation;
pub mod trace_id;
pub mod validation;

pub use self::api_entry::{
    ApiEntry, ApiEntryId, DEFAULT_SPECIFICATION_CONTENT_TYPE, NewApiEntry, NewSpecificationFile,
    SpecificationDownload, SpecificationFile, SpecificationFileId, SpecificationUpload,
};
pub use self::catalogue_service::{ApiCatalogueService, MAX_PAGE_SIZE};
pub use self::error::{Error, ErrorCode};
pub use self::presentation::ViewApi;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{ApiDraft, ApiError, ApiErrorKind, RequiredField};
