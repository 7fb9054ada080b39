//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Uploaded specification documents.
    ///
    /// Each row is owned by exactly one `api_entries` row.
    specification_files (id) {
        /// Primary key, assigned from a sequence.
        id -> Int8,
        /// MIME type declared by the uploader.
        content_type -> Varchar,
        /// Absolute path of the stored document.
        file_path -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue entries.
    ///
    /// `(name, version)` is unique; `specification_file_id` is unique and
    /// references `specification_files`.
    api_entries (id) {
        /// Primary key, assigned from a sequence starting at 1.
        id -> Int8,
        /// API name.
        name -> Varchar,
        /// API version label.
        version -> Varchar,
        /// Free-form specification format label, e.g. `swagger`.
        specification_type -> Varchar,
        /// Owned specification file record.
        specification_file_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last overwrite timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(api_entries -> specification_files (specification_file_id));
diesel::allow_tables_to_appear_in_same_query!(api_entries, specification_files);
