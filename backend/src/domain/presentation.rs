//! Display rows for the server-rendered catalogue list.

use super::ApiEntry;

/// One row of the catalogue list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewApi {
    /// `"<name> - <version>"`.
    pub display_name: String,
    /// Public download path of the specification.
    pub download_link: String,
    pub specification_type: String,
}

impl From<&ApiEntry> for ViewApi {
    fn from(entry: &ApiEntry) -> Self {
        Self {
            display_name: format!("{} - {}", entry.name, entry.version),
            download_link: entry.specification_path(),
            specification_type: entry.specification_type.clone(),
        }
    }
}
