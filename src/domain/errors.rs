//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use sea_orm::{DbErr, RuntimeErr};
use sqlx::error::ErrorKind;

#[derive(Debug)]
pub enum DomainError {
    /// Key resolved to no record
    NotFound,
    /// An entity mapping does not match the tables in the store
    SchemaMismatch(String),
    /// A record handed to a mutation cannot be staged as given
    InvalidArgument(String),
    /// Restrict-on-delete, foreign key or uniqueness violation at commit
    ConstraintViolation(String),
    /// The store could not be reached
    StoreUnavailable(String),
    /// Any other database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::SchemaMismatch(msg) => write!(f, "Schema mismatch: {}", msg),
            DomainError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DomainError::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
            DomainError::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DomainError::ConstraintViolation(_))
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match &e {
            DbErr::RecordNotUpdated => DomainError::NotFound,
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                DomainError::StoreUnavailable(e.to_string())
            }
            DbErr::Exec(RuntimeErr::SqlxError(inner)) | DbErr::Query(RuntimeErr::SqlxError(inner)) => {
                classify_sqlx(inner).unwrap_or_else(|| DomainError::Database(e.to_string()))
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}

fn classify_sqlx(err: &sqlx::Error) -> Option<DomainError> {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                Some(DomainError::ConstraintViolation(db_err.message().to_string()))
            }
            // SQLite builds without extended result codes report only the message
            _ if db_err.message().contains("constraint failed") => {
                Some(DomainError::ConstraintViolation(db_err.message().to_string()))
            }
            _ => None,
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => Some(DomainError::StoreUnavailable(err.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_updated_is_not_found() {
        assert!(matches!(
            DomainError::from(DbErr::RecordNotUpdated),
            DomainError::NotFound
        ));
    }

    #[test]
    fn connection_errors_are_store_unavailable() {
        let err = DbErr::Conn(RuntimeErr::Internal("refused".into()));
        assert!(matches!(
            DomainError::from(err),
            DomainError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn unclassified_errors_stay_database_errors() {
        let err = DbErr::Custom("boom".into());
        assert!(matches!(DomainError::from(err), DomainError::Database(_)));
    }
}
