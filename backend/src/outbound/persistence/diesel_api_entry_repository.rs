//! PostgreSQL-backed `ApiEntryRepository` implementation using Diesel ORM.
//!
//! Every write runs inside one transaction. Upserts insert the new file
//! record first, then try a conflict-free insert of the entry; when the
//! `(name, version)` pair already exists the row is locked, repointed at the
//! new file, and the detached file record is deleted and returned.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{ApiEntryRepository, ApiEntryRepositoryError, UpsertOutcome};
use crate::domain::{
    ApiEntry, ApiEntryId, NewApiEntry, NewSpecificationFile, SpecificationFile,
    SpecificationFileId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    ApiEntryOverwrite, ApiEntryRow, NewApiEntryRow, NewSpecificationFileRow, SpecificationFileRow,
};
use super::pool::DbPool;
use super::schema::{api_entries, specification_files};

/// Diesel-backed implementation of the `ApiEntryRepository` port.
#[derive(Clone)]
pub struct DieselApiEntryRepository {
    pool: DbPool,
}

impl DieselApiEntryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_file(row: SpecificationFileRow) -> SpecificationFile {
    SpecificationFile {
        id: SpecificationFileId::new(row.id),
        content_type: row.content_type,
        file_path: PathBuf::from(row.file_path),
    }
}

fn rows_to_entry(entry: ApiEntryRow, file: SpecificationFileRow) -> ApiEntry {
    ApiEntry {
        id: ApiEntryId::new(entry.id),
        name: entry.name,
        version: entry.version,
        specification_type: entry.specification_type,
        specification_file: row_to_file(file),
    }
}

type UpsertRows = (ApiEntryRow, SpecificationFileRow, Option<SpecificationFileRow>);

#[async_trait]
impl ApiEntryRepository for DieselApiEntryRepository {
    async fn find_by_id(&self, id: ApiEntryId) -> Result<Option<ApiEntry>, ApiEntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(ApiEntryRow, SpecificationFileRow)> = api_entries::table
            .inner_join(specification_files::table)
            .filter(api_entries::id.eq(id.as_i64()))
            .select((ApiEntryRow::as_select(), SpecificationFileRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find api entry"))?;

        Ok(row.map(|(entry, file)| rows_to_entry(entry, file)))
    }

    async fn find_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<ApiEntry>, ApiEntryRepositoryError> {
        let limit = i64::from(request.page_size());
        let offset = i64::try_from(request.offset())
            .map_err(|_| ApiEntryRepositoryError::query("page offset out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Count and slice inside one transaction so both observe the same
        // snapshot.
        let (total, rows) = conn
            .transaction(|conn| {
                async move {
                    let total: i64 = api_entries::table.count().get_result(conn).await?;
                    let rows: Vec<(ApiEntryRow, SpecificationFileRow)> = api_entries::table
                        .inner_join(specification_files::table)
                        .select((ApiEntryRow::as_select(), SpecificationFileRow::as_select()))
                        .order_by((api_entries::name.asc(), api_entries::version.asc()))
                        .limit(limit)
                        .offset(offset)
                        .load(conn)
                        .await?;
                    Ok::<_, DieselError>((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_diesel_error(error, "load api entry page"))?;

        let total = u64::try_from(total)
            .map_err(|_| ApiEntryRepositoryError::query("negative api entry count"))?;
        let content = rows
            .into_iter()
            .map(|(entry, file)| rows_to_entry(entry, file))
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn upsert(
        &self,
        entry: &NewApiEntry,
        file: &NewSpecificationFile,
    ) -> Result<UpsertOutcome, ApiEntryRepositoryError> {
        let file_path = file.file_path.to_str().ok_or_else(|| {
            ApiEntryRepositoryError::query(format!(
                "specification file path is not valid UTF-8: {}",
                file.file_path.display()
            ))
        })?;
        let content_type = file.content_type.as_str();
        let name = entry.name();
        let version = entry.version();
        let specification_type = entry.specification_type();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (entry_row, file_row, replaced_row): UpsertRows = conn
            .transaction(|conn| {
                async move {
                    let now = Utc::now();
                    let file_row: SpecificationFileRow =
                        diesel::insert_into(specification_files::table)
                            .values(&NewSpecificationFileRow {
                                content_type,
                                file_path,
                            })
                            .returning(SpecificationFileRow::as_returning())
                            .get_result(conn)
                            .await?;

                    let inserted: Option<ApiEntryRow> = diesel::insert_into(api_entries::table)
                        .values(&NewApiEntryRow {
                            name,
                            version,
                            specification_type,
                            specification_file_id: file_row.id,
                            updated_at: now,
                        })
                        .on_conflict((api_entries::name, api_entries::version))
                        .do_nothing()
                        .returning(ApiEntryRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;

                    if let Some(entry_row) = inserted {
                        return Ok::<UpsertRows, DieselError>((entry_row, file_row, None));
                    }

                    let existing: ApiEntryRow = api_entries::table
                        .filter(api_entries::name.eq(name))
                        .filter(api_entries::version.eq(version))
                        .select(ApiEntryRow::as_select())
                        .for_update()
                        .first(conn)
                        .await?;

                    let entry_row: ApiEntryRow = diesel::update(api_entries::table.find(existing.id))
                        .set(&ApiEntryOverwrite {
                            specification_type,
                            specification_file_id: file_row.id,
                            updated_at: now,
                        })
                        .returning(ApiEntryRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let replaced: SpecificationFileRow = diesel::delete(
                        specification_files::table.find(existing.specification_file_id),
                    )
                    .returning(SpecificationFileRow::as_returning())
                    .get_result(conn)
                    .await?;

                    Ok((entry_row, file_row, Some(replaced)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_diesel_error(error, "upsert api entry"))?;

        Ok(UpsertOutcome {
            entry: rows_to_entry(entry_row, file_row),
            replaced_file: replaced_row.map(row_to_file),
        })
    }

    async fn delete(&self, id: ApiEntryId) -> Result<Option<ApiEntry>, ApiEntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = conn
            .transaction(|conn| {
                async move {
                    let entry: Option<ApiEntryRow> =
                        diesel::delete(api_entries::table.find(id.as_i64()))
                            .returning(ApiEntryRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;
                    let Some(entry) = entry else {
                        return Ok::<_, DieselError>(None);
                    };

                    let file: SpecificationFileRow =
                        diesel::delete(specification_files::table.find(entry.specification_file_id))
                            .returning(SpecificationFileRow::as_returning())
                            .get_result(conn)
                            .await?;
                    Ok(Some((entry, file)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| map_diesel_error(error, "delete api entry"))?;

        Ok(removed.map(|(entry, file)| rows_to_entry(entry, file)))
    }
}
