//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the Diesel implementation of the catalogue repository port with
//! async support through `diesel-async` and `bb8` connection pooling.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   internal to this module.
//! - Database errors are mapped to `ApiEntryRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use api_catalogue::outbound::persistence::{DbPool, DieselApiEntryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalogue")).await?;
//! let repo = DieselApiEntryRepository::new(pool);
//! ```

mod diesel_api_entry_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_api_entry_repository::DieselApiEntryRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
