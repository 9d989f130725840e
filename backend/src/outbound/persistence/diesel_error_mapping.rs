//! Shared Diesel error mapping for the resource repositories.
//!
//! Raw driver messages are logged at debug level and never copied into the
//! port errors, which only carry a short category description.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "database pool unavailable");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query, connection or conflict constructors.
///
/// Unique-constraint violations become `conflict` so a racing insert is
/// reported like a failed uniqueness pre-check.
pub fn map_diesel_error<E, Q, C, D>(
    error: DieselError,
    query: Q,
    connection: C,
    conflict: D,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    D: FnOnce() -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => conflict(),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}
