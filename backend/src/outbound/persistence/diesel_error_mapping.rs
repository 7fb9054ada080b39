//! Diesel and pool error mapping for the catalogue repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ApiEntryRepositoryError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> ApiEntryRepositoryError {
    ApiEntryRepositoryError::connection(error.into_message())
}

/// Map Diesel failures, logging the database-level detail at debug level.
///
/// Closed connections surface as connection errors so the service can
/// report them as unavailable; everything else is a query error.
pub(crate) fn map_diesel_error(
    error: DieselError,
    operation: &'static str,
) -> ApiEntryRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(%error, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ApiEntryRepositoryError::connection(format!("{operation}: database connection closed"))
        }
        DieselError::BrokenTransactionManager => {
            ApiEntryRepositoryError::connection(format!("{operation}: transaction manager broken"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ApiEntryRepositoryError::query(format!("{operation}: unique constraint violated"))
        }
        DieselError::NotFound => ApiEntryRepositoryError::query(format!("{operation}: record not found")),
        DieselError::QueryBuilderError(_) => {
            ApiEntryRepositoryError::query(format!("{operation}: database query error"))
        }
        _ => ApiEntryRepositoryError::query(format!("{operation}: database error")),
    }
}
