use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

/// Name of the Postgres exclusion constraint that forbids overlapping schedules
pub const OVERLAP_CONSTRAINT: &str = "schedules_no_overlap";

/// SQLSTATE of a Postgres serialization failure
const SERIALIZATION_FAILURE: &str = "40001";

/// Message prefix Postgres uses for every serialization failure
const SERIALIZATION_FAILURE_MESSAGE: &str = "could not serialize access";

/// Errors surfaced by the scheduling services.
///
/// Everything except [`ServiceError::Retryable`] and [`ServiceError::Internal`]
/// is detected before any write happens. Only `Internal` hides its message from
/// the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input, or `start_time >= end_time`
    #[error("{0}")]
    Validation(String),
    /// The request is well-formed but not answerable as asked
    #[error("{0}")]
    BadRequest(String),
    /// Time slot overlap, against the store or within a batch
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    /// The acting user's role does not allow this operation
    #[error("{0}")]
    Forbidden(String),
    /// A serializable transaction lost a race with a concurrent one and may be retried
    #[error("the schedule changed concurrently, retry the request")]
    Retryable(#[source] DbErr),
    /// Unexpected persistence failure; the cause must not reach the caller
    #[error("internal database error")]
    Internal(#[source] DbErr),
}

impl ServiceError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{what} {id} not found"))
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        // The exclusion constraint is the store-level backstop for the overlap check
        if err.to_string().contains(OVERLAP_CONSTRAINT) {
            return Self::Conflict("Schedule overlaps an existing schedule for this class".into());
        }

        if is_serialization_failure(&err) {
            return Self::Retryable(err);
        }

        Self::Internal(err)
    }
}

fn is_serialization_failure(err: &DbErr) -> bool {
    let code = match err {
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| code.into_owned()),
        _ => None,
    };

    code.as_deref() == Some(SERIALIZATION_FAILURE)
        || err.to_string().contains(SERIALIZATION_FAILURE_MESSAGE)
}
