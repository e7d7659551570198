//! Shared Diesel error mapping for the repositories in this module.
//!
//! Diesel and pool failures are folded into a small [`DieselFailure`]
//! classification so each repository only decides which constraint
//! violations carry domain meaning.

use tracing::debug;

use super::pool::PoolError;

/// Classified Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection was lost or never established.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// Any other query failure.
    Query(String),
}

impl DieselFailure {
    /// True when the failure is a unique violation on `constraint`.
    pub(crate) fn violates(&self, constraint: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(name) } if name == constraint
        )
    }

    /// Fold the failure into a repository error using the given constructors.
    ///
    /// Unique violations that the caller did not claim are reported as query
    /// failures.
    pub(crate) fn into_error<E, Q, C>(self, query: Q, connection: C) -> E
    where
        Q: FnOnce(String) -> E,
        C: FnOnce(String) -> E,
    {
        match self {
            Self::Connection(message) => connection(message),
            Self::UniqueViolation { constraint } => query(format!(
                "unique constraint violated: {}",
                constraint.as_deref().unwrap_or("unknown")
            )),
            Self::Query(message) => query(message),
        }
    }
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query("database query error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            DieselFailure::Query("transaction conflict".to_owned())
        }
        _ => DieselFailure::Query("database error".to_owned()),
    }
}
