//! Catalogue entries and their owned specification files.
//!
//! An [`ApiEntry`] is identified by a store-assigned numeric id and by its
//! natural key, the `(name, version)` pair. Each entry owns exactly one
//! [`SpecificationFile`] record pointing at the uploaded document on disk.

use std::fmt;
use std::path::{Path, PathBuf};

/// Content type recorded when an upload does not declare one.
pub const DEFAULT_SPECIFICATION_CONTENT_TYPE: &str = "application/octet-stream";

/// Store-assigned identifier of a catalogue entry. The first entry is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiEntryId(i64);

impl ApiEntryId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Public download path of the specification owned by this entry.
    ///
    /// # Examples
    /// ```
    /// use api_catalogue::domain::ApiEntryId;
    ///
    /// assert_eq!(
    ///     ApiEntryId::new(1).specification_path(),
    ///     "/catalogueApi/apis/1/specificationFile"
    /// );
    /// ```
    #[must_use]
    pub fn specification_path(self) -> String {
        format!("/catalogueApi/apis/{}/specificationFile", self.0)
    }
}

impl fmt::Display for ApiEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned identifier of a specification file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecificationFileId(i64);

impl SpecificationFileId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }
}

/// Persisted record of an uploaded specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationFile {
    pub id: SpecificationFileId,
    /// MIME type supplied by the uploader, trusted as-is.
    pub content_type: String,
    /// Absolute location of the document on durable storage.
    pub file_path: PathBuf,
}

/// Stored catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEntry {
    pub id: ApiEntryId,
    pub name: String,
    pub version: String,
    pub specification_type: String,
    pub specification_file: SpecificationFile,
}

impl ApiEntry {
    /// Download path derived from the persisted id; never stored.
    #[must_use]
    pub fn specification_path(&self) -> String {
        self.id.specification_path()
    }
}

/// Validated metadata for an entry that is about to be created or replaced.
///
/// Only [`crate::domain::ApiDraft::validate`] constructs this type, so every
/// field is known to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiEntry {
    name: String,
    version: String,
    specification_type: String,
}

impl NewApiEntry {
    pub(crate) fn from_validated(name: String, version: String, specification_type: String) -> Self {
        Self {
            name,
            version,
            specification_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn specification_type(&self) -> &str {
        &self.specification_type
    }
}

/// File record to persist alongside a new or replaced entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpecificationFile {
    pub content_type: String,
    pub file_path: PathBuf,
}

impl NewSpecificationFile {
    /// Build a record for a file already placed at `file_path`.
    pub fn new(content_type: impl Into<String>, file_path: impl AsRef<Path>) -> Self {
        Self {
            content_type: content_type.into(),
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

/// Uploaded specification document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationUpload {
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl SpecificationUpload {
    pub fn new(content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let content_type = content_type.filter(|value| !value.trim().is_empty());
        Self {
            content_type,
            bytes,
        }
    }

    /// Declared content type, or [`DEFAULT_SPECIFICATION_CONTENT_TYPE`].
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(DEFAULT_SPECIFICATION_CONTENT_TYPE)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Stored document ready to be streamed back to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationDownload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
