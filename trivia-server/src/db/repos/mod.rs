//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for question listings (no N+1)
//! - Relies on UNIQUE / FOREIGN KEY constraints, no check-then-insert
//! - Maps constraint violations to typed errors

pub mod categories;
pub mod questions;

pub use categories::CategoryRepo;
pub use questions::QuestionRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A UNIQUE constraint rejected the write
    #[error("duplicate {resource}: '{value}'")]
    DuplicateEntry { resource: &'static str, value: String },

    /// A FOREIGN KEY constraint on `questions.category` rejected the write
    #[error("unknown category {0}")]
    UnknownCategory(i32),
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DbError::DuplicateEntry {
            resource: "question",
            value: "Who is Cassius Clay?".into(),
        };
        assert_eq!(err.to_string(), "duplicate question: 'Who is Cassius Clay?'");

        let err = DbError::NotFound {
            resource: "question",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "not found: question '42'");
    }

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
    }
}
