//! In-memory catalogue repository.
//!
//! Used when no database URL is configured and by integration tests. The
//! whole upsert runs under one mutex guard, so the `(name, version)` pair
//! stays unique under concurrent submissions. Contents are lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tokio::sync::Mutex;

use crate::domain::ports::{ApiEntryRepository, ApiEntryRepositoryError, UpsertOutcome};
use crate::domain::{
    ApiEntry, ApiEntryId, NewApiEntry, NewSpecificationFile, SpecificationFile,
    SpecificationFileId,
};

#[derive(Debug)]
struct Tables {
    entries: BTreeMap<i64, ApiEntry>,
    next_entry_id: i64,
    next_file_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_entry_id: 1,
            next_file_id: 1,
        }
    }
}

impl Tables {
    fn find_by_name_and_version(&self, name: &str, version: &str) -> Option<i64> {
        self.entries
            .values()
            .find(|entry| entry.name == name && entry.version == version)
            .map(|entry| entry.id.as_i64())
    }

    fn allocate_file(&mut self, file: &NewSpecificationFile) -> SpecificationFile {
        let id = self.next_file_id;
        self.next_file_id += 1;
        SpecificationFile {
            id: SpecificationFileId::new(id),
            content_type: file.content_type.clone(),
            file_path: file.file_path.clone(),
        }
    }
}

/// Process-local implementation of the `ApiEntryRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryApiEntryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryApiEntryRepository {
    /// Create an empty repository; the first entry receives id `1`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiEntryRepository for InMemoryApiEntryRepository {
    async fn find_by_id(&self, id: ApiEntryId) -> Result<Option<ApiEntry>, ApiEntryRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.entries.get(&id.as_i64()).cloned())
    }

    async fn find_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<ApiEntry>, ApiEntryRepositoryError> {
        let tables = self.tables.lock().await;
        let mut sorted: Vec<&ApiEntry> = tables.entries.values().collect();
        sorted.sort_by(|a, b| (&a.name, &a.version).cmp(&(&b.name, &b.version)));

        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = sorted
            .into_iter()
            .skip(skip)
            .take(request.page_size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, tables.entries.len() as u64))
    }

    async fn upsert(
        &self,
        entry: &NewApiEntry,
        file: &NewSpecificationFile,
    ) -> Result<UpsertOutcome, ApiEntryRepositoryError> {
        let mut tables = self.tables.lock().await;
        let specification_file = tables.allocate_file(file);

        if let Some(id) = tables.find_by_name_and_version(entry.name(), entry.version()) {
            let Some(existing) = tables.entries.get_mut(&id) else {
                return Err(ApiEntryRepositoryError::query(format!(
                    "api entry {id} vanished during upsert"
                )));
            };
            existing.specification_type = entry.specification_type().to_owned();
            let replaced = std::mem::replace(&mut existing.specification_file, specification_file);
            return Ok(UpsertOutcome {
                entry: existing.clone(),
                replaced_file: Some(replaced),
            });
        }

        let id = tables.next_entry_id;
        tables.next_entry_id += 1;
        let stored = ApiEntry {
            id: ApiEntryId::new(id),
            name: entry.name().to_owned(),
            version: entry.version().to_owned(),
            specification_type: entry.specification_type().to_owned(),
            specification_file,
        };
        tables.entries.insert(id, stored.clone());
        Ok(UpsertOutcome {
            entry: stored,
            replaced_file: None,
        })
    }

    async fn delete(&self, id: ApiEntryId) -> Result<Option<ApiEntry>, ApiEntryRepositoryError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.entries.remove(&id.as_i64()))
    }
}
