//! Error types for trivia-server operations

use thiserror::Error;

use crate::db::DbError;
use crate::models::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to return: empty table, missing id, page out of range
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Question text already stored
    #[error("question already exists: '{0}'")]
    DuplicateEntry(String),

    #[error("category {0} does not exist")]
    UnknownCategory(i32),

    /// Storage failure (connection, SQL); never shown to clients verbatim
    #[error(transparent)]
    Database(DbError),
}

impl From<DbError> for Error {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => {
                Self::NotFound(format!("{} '{}' not found", resource, id))
            }
            DbError::DuplicateEntry { value, .. } => Self::DuplicateEntry(value),
            DbError::UnknownCategory(id) => Self::UnknownCategory(id),
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_keep_their_kind() {
        let err = Error::from(DbError::DuplicateEntry {
            resource: "question",
            value: "Who?".into(),
        });
        assert!(matches!(err, Error::DuplicateEntry(ref v) if v == "Who?"));

        let err = Error::from(DbError::UnknownCategory(7));
        assert!(matches!(err, Error::UnknownCategory(7)));

        let err = Error::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, Error::Database(_)));
    }
}
