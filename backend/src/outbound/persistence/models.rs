//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{api_entries, specification_files};

/// Row struct for reading from the api_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = api_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApiEntryRow {
    pub id: i64,
    pub name: String,
    pub version: String,
    pub specification_type: String,
    pub specification_file_id: i64,
}

/// Row struct for reading from the specification_files table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = specification_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SpecificationFileRow {
    pub id: i64,
    pub content_type: String,
    pub file_path: String,
}

/// Insertable struct for new specification file records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = specification_files)]
pub(crate) struct NewSpecificationFileRow<'a> {
    pub content_type: &'a str,
    pub file_path: &'a str,
}

/// Insertable struct for new catalogue entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = api_entries)]
pub(crate) struct NewApiEntryRow<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub specification_type: &'a str,
    pub specification_file_id: i64,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when an existing `(name, version)` pair is overwritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = api_entries)]
pub(crate) struct ApiEntryOverwrite<'a> {
    pub specification_type: &'a str,
    pub specification_file_id: i64,
    pub updated_at: DateTime<Utc>,
}
